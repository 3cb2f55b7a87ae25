//! Core state model for the lucky wheel widget.
//!
//! Everything in this crate is independent of the rendering surface so it can
//! be driven by the egui front-end, the CLI, or plain unit tests.
//!
//! ## Architecture
//!
//! - **Options**: the eight segment labels and their persistence
//! - **Environment**: host classification resolved once into [`Capabilities`]
//! - **Announcer**: spoken or alert notification of a result
//! - **Wheel**: spin lifecycle, target angle and the one-shot completion task
//! - **Editor**: edit/reset gestures and input validation
//! - **Widget**: the state object that owns all of the above
//!
//! ## Usage
//!
//! ```rust
//! use lucky_wheel_core::{Capabilities, Instant, MemoryStore, NoSpeech, Widget, WheelConfig};
//!
//! let config = WheelConfig::default();
//! let mut widget = Widget::new(
//!     config,
//!     Capabilities::standard(),
//!     MemoryStore::default(),
//!     None::<NoSpeech>,
//! );
//! assert_eq!(widget.options().len(), 8);
//!
//! let plan = widget.spin(Instant::now()).expect("idle wheel spins");
//! assert!(plan.index < 8);
//! ```

mod announce;
mod config;
mod editor;
mod environment;
mod error;
mod offline;
mod options;
mod storage;
mod wheel;
mod widget;

pub use announce::{
    result_message, select_voice, Announcement, Announcer, NoSpeech, SpeechSynth, Utterance, Voice,
    EMBEDDED_TEST_ADVISORY, TEST_MESSAGE, UNSUPPORTED_TEST_MESSAGE,
};
pub use config::WheelConfig;
pub use editor::{
    edit_prompt_text, parse_edit_input, EditOutcome, LongPress, EDIT_PROMPT, RESET_CONFIRM,
    RESET_DONE, WRONG_COUNT_MESSAGE,
};
pub use environment::{is_embedded_browser, Capabilities, Environment, SpeechSupport};
pub use error::{WheelError, WheelResult};
pub use offline::{plan_registration, RegistrationPlan, SkipReason};
pub use options::{OptionSet, OptionsStore, DEFAULT_LABELS, SEGMENT_COUNT};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::JsonFileStore;
pub use storage::{KeyValueStore, MemoryStore};
pub use wheel::{
    target_angle, IndexSource, RandomIndex, ScheduledTask, SpinOutcome, SpinPlan,
    SpinState, TaskId, WheelController, HALF_SEGMENT_DEGREES, SEGMENT_DEGREES,
};
pub use widget::Widget;

/// Monotonic clock type used by the wheel scheduler.
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

/// Monotonic clock type used by the wheel scheduler.
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
