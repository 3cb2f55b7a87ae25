//! Config command implementation.
//!
//! Shows the effective configuration.

use anyhow::Result;
use lucky_wheel_core::JsonFileStore;

use crate::config::Config;

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    let wheel = &config.wheel;
    println!("Lucky Wheel Configuration");
    println!("{:-<40}", "");

    println!("Data Directory:      {}", config.data_dir.display());
    println!(
        "Options File:        {}",
        JsonFileStore::in_dir(&config.data_dir).path().display()
    );
    println!("Storage Key:         {}", wheel.storage_key);
    println!("Locale:              {}", wheel.locale);
    println!("Extra Rotations:     {}", wheel.extra_rotations);
    println!("Spin Duration:       {} ms", wheel.spin_duration_ms);
    println!("Long Press:          {} ms", wheel.long_press_ms);
    println!("Embedded Marker:     {}", wheel.embedded_marker);
    println!(
        "User Agent:          {}",
        wheel.user_agent.as_deref().unwrap_or("(not set)")
    );

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Print the config file location.
pub fn path() -> Result<()> {
    match Config::config_file_path() {
        Some(path) => println!("{}", path.display()),
        None => println!("(no config file path available)"),
    }
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
