//! Overlay rendering helpers.

mod overlays;

pub use overlays::{draw_press_progress, draw_result_highlight};
