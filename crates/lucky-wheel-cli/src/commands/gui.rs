//! Native egui window.
//!
//! Launches a desktop window running the same app as the web build, with
//! options persisted under the configured data directory.

use anyhow::Result;
use eframe::{run_native, NativeOptions};
use lucky_wheel_viz::{Host, LuckyWheelApp};
use tracing::info;

use crate::config::Config;

/// Execute the gui command.
pub fn execute(config: &Config) -> Result<()> {
    info!(data_dir = %config.data_dir.display(), "Launching native wheel");

    let options = NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([320.0, 420.0])
            .with_title("幸运转盘"),
        ..Default::default()
    };

    let wheel = config.wheel.clone();
    let data_dir = config.data_dir.clone();

    run_native(
        "Lucky Wheel",
        options,
        Box::new(move |cc| {
            let host = Host::native(&wheel, Some(data_dir.as_path()));
            Ok(Box::new(LuckyWheelApp::with_host(cc, wheel, host)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Wheel window error: {}", e))?;

    Ok(())
}
