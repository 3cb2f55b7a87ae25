//! Options command implementation.
//!
//! Reads and writes the same `options.json` the native window uses.

use anyhow::{bail, Context, Result};
use lucky_wheel_core::{
    parse_edit_input, JsonFileStore, OptionsStore, WheelError, RESET_DONE, WRONG_COUNT_MESSAGE,
};

use crate::config::Config;

fn open_store(config: &Config) -> OptionsStore<JsonFileStore> {
    OptionsStore::new(
        JsonFileStore::in_dir(&config.data_dir),
        config.wheel.storage_key.clone(),
    )
}

/// Print the current labels, numbered from 1.
pub fn show(config: &Config) -> Result<()> {
    let store = open_store(config);
    let options = store.load();

    for (index, label) in options.iter().enumerate() {
        println!("{}. {}", index + 1, label);
    }
    if options.is_default() {
        println!("(defaults)");
    }
    Ok(())
}

/// Replace the labels with a comma-separated list of exactly eight.
pub fn set(config: &Config, labels: &str) -> Result<()> {
    let options = match parse_edit_input(labels) {
        Ok(options) => options,
        Err(WheelError::WrongLabelCount { found }) => {
            bail!("{} (got {})", WRONG_COUNT_MESSAGE, found)
        }
        Err(err) => return Err(err.into()),
    };

    let mut store = open_store(config);
    store.save(&options).with_context(|| {
        format!(
            "Failed to save options to {}",
            store.backend().path().display()
        )
    })?;

    println!("✅ Saved options: {}", options.join(","));
    Ok(())
}

/// Restore the defaults and erase the saved key.
pub fn reset(config: &Config) -> Result<()> {
    let mut store = open_store(config);
    store.clear().with_context(|| {
        format!(
            "Failed to clear options in {}",
            store.backend().path().display()
        )
    })?;

    println!("{}", RESET_DONE);
    Ok(())
}
