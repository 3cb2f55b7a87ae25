//! Label editing and reset gestures.

use std::time::Duration;

use crate::error::WheelResult;
use crate::options::OptionSet;
use crate::Instant;

/// Prompt shown when editing labels.
pub const EDIT_PROMPT: &str = "请输入8个选项，用逗号分隔:";

/// Error shown when an edit does not have exactly eight labels.
pub const WRONG_COUNT_MESSAGE: &str = "请确保输入8个选项！";

/// Confirmation shown before a reset.
pub const RESET_CONFIRM: &str = "是否要重置所有选项？";

/// Notice shown after a reset.
pub const RESET_DONE: &str = "选项已重置！";

/// Separator between labels in the edit prompt.
pub const SEPARATOR: char = ',';

/// Text the edit prompt is pre-filled with.
pub fn edit_prompt_text(options: &OptionSet) -> String {
    options.join(&SEPARATOR.to_string())
}

/// Split prompt input on commas, trimming each label.
pub fn parse_edit_input(input: &str) -> WheelResult<OptionSet> {
    OptionSet::from_labels(input.split(SEPARATOR).map(str::trim))
}

/// Result of submitting the edit prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Dismissed, or confirmed empty.
    Cancelled,
    /// Labels replaced and persisted.
    Updated,
    /// Wrong label count; the current labels are kept.
    Rejected { found: usize },
    /// Edits are not accepted while the wheel spins.
    Busy,
}

/// Long-press detector for the reset gesture.
///
/// A press arms a deadline; releasing before it cancels. The gesture fires at
/// most once per press.
#[derive(Debug, Clone, Default)]
pub struct LongPress {
    threshold: Duration,
    deadline: Option<Instant>,
}

impl LongPress {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            deadline: None,
        }
    }

    /// Begin a press. Presses while the wheel spins are ignored.
    pub fn press(&mut self, now: Instant, spinning: bool) {
        if spinning {
            return;
        }
        self.deadline = Some(now + self.threshold);
    }

    /// End the press, cancelling a gesture that has not fired yet.
    pub fn release(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once when the press has been held long enough.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Fraction of the threshold held so far, for progress feedback.
    pub fn progress(&self, now: Instant) -> Option<f32> {
        let deadline = self.deadline?;
        if self.threshold.is_zero() {
            return Some(1.0);
        }
        let left = deadline.saturating_duration_since(now).as_secs_f32();
        Some((1.0 - left / self.threshold.as_secs_f32()).clamp(0.0, 1.0))
    }
}
