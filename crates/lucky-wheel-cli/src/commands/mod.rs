//! CLI command implementations.

pub mod config;
pub mod gui;
pub mod options;
pub mod spin;
