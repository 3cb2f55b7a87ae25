//! The widget state object owned by the front-end.

use tracing::{debug, warn};

use crate::announce::{Announcement, Announcer, NoSpeech, SpeechSynth};
use crate::config::WheelConfig;
use crate::editor::{edit_prompt_text, parse_edit_input, EditOutcome};
use crate::environment::Capabilities;
use crate::error::WheelError;
use crate::options::{OptionSet, OptionsStore};
use crate::storage::KeyValueStore;
use crate::wheel::{IndexSource, RandomIndex, SpinOutcome, SpinPlan, WheelController};
use crate::Instant;

/// Labels, spin lock, announcer and persistence in one place.
///
/// Nothing is held at module scope: the app owns a `Widget` and drives it
/// from its event loop.
pub struct Widget<S, T = NoSpeech, R = RandomIndex> {
    config: WheelConfig,
    options: OptionSet,
    store: OptionsStore<S>,
    wheel: WheelController<R>,
    announcer: Announcer<T>,
    last_result: Option<SpinOutcome>,
}

impl<S: KeyValueStore, T: SpeechSynth> Widget<S, T, RandomIndex> {
    /// Hydrate labels from `store` and use the thread RNG for spins.
    pub fn new(
        config: WheelConfig,
        capabilities: Capabilities,
        store: S,
        speech: Option<T>,
    ) -> Self {
        Self::with_index_source(config, capabilities, store, speech, RandomIndex)
    }
}

impl<S: KeyValueStore, T: SpeechSynth, R: IndexSource> Widget<S, T, R> {
    /// Like [`Widget::new`] with an explicit index source.
    pub fn with_index_source(
        config: WheelConfig,
        capabilities: Capabilities,
        store: S,
        speech: Option<T>,
        source: R,
    ) -> Self {
        let store = OptionsStore::new(store, config.storage_key.clone());
        let options = store.load();
        let wheel = WheelController::new(source, config.extra_rotations, config.spin_duration());
        let announcer = Announcer::new(capabilities, config.locale.clone(), speech);
        debug!(
            environment = capabilities.environment.label(),
            speech = capabilities.has_speech(),
            custom = !options.is_default(),
            "Widget initialized"
        );

        Self {
            config,
            options,
            store,
            wheel,
            announcer,
            last_result: None,
        }
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn capabilities(&self) -> Capabilities {
        self.announcer.capabilities()
    }

    pub fn store(&self) -> &OptionsStore<S> {
        &self.store
    }

    pub fn wheel(&self) -> &WheelController<R> {
        &self.wheel
    }

    pub fn announcer(&self) -> &Announcer<T> {
        &self.announcer
    }

    pub fn is_spinning(&self) -> bool {
        self.wheel.is_spinning()
    }

    /// Current target rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.wheel.rotation()
    }

    /// Most recently revealed result.
    pub fn last_result(&self) -> Option<&SpinOutcome> {
        self.last_result.as_ref()
    }

    /// Spin trigger. `None` when a spin is already running.
    pub fn spin(&mut self, now: Instant) -> Option<SpinPlan> {
        self.wheel.spin(now)
    }

    /// Complete a due spin: reveal the result, then announce it.
    pub fn poll(&mut self, now: Instant) -> Option<(SpinOutcome, Announcement)> {
        let outcome = self.wheel.poll(now, &self.options)?;
        self.last_result = Some(outcome.clone());
        let announcement = self.announcer.announce(&outcome.label, false);
        Some((outcome, announcement))
    }

    /// Voice test trigger.
    pub fn test_voice(&mut self) -> Announcement {
        self.announcer.announce("", true)
    }

    /// Forward the platform's "voices changed" notification.
    pub fn voices_changed(&mut self) -> usize {
        self.announcer.voices_changed()
    }

    /// Pre-filled edit prompt, or `None` while spinning.
    pub fn edit_prompt(&self) -> Option<String> {
        if self.is_spinning() {
            return None;
        }
        Some(edit_prompt_text(&self.options))
    }

    /// Apply the edit prompt's result. `None` means the prompt was dismissed.
    pub fn submit_edit(&mut self, input: Option<&str>) -> EditOutcome {
        if self.is_spinning() {
            return EditOutcome::Busy;
        }
        let input = match input {
            Some(input) if !input.is_empty() => input,
            _ => return EditOutcome::Cancelled,
        };

        match parse_edit_input(input) {
            Ok(options) => {
                if let Err(err) = self.store.save(&options) {
                    warn!(error = %err, "Failed to persist options");
                }
                self.options = options;
                EditOutcome::Updated
            }
            Err(WheelError::WrongLabelCount { found }) => {
                debug!(found, "Rejected edit");
                EditOutcome::Rejected { found }
            }
            Err(err) => {
                warn!(error = %err, "Unexpected edit failure");
                EditOutcome::Cancelled
            }
        }
    }

    /// Restore the defaults if `confirmed`. Returns whether a reset happened.
    pub fn reset(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        self.options = OptionSet::default();
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "Failed to clear persisted options");
        }
        true
    }
}
