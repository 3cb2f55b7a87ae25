//! Native desktop runner for lucky-wheel-viz development.
//!
//! Run with: cargo run --example native --features native
//! Persist options to a directory: cargo run --example native --features native -- --data-dir /tmp/wheel

use std::path::PathBuf;

use eframe::{run_native, NativeOptions};
use lucky_wheel_core::WheelConfig;
use lucky_wheel_viz::{Host, LuckyWheelApp};

fn main() -> eframe::Result<()> {
    #[cfg(debug_assertions)]
    {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(
                EnvFilter::from_default_env()
                    .add_directive("lucky_wheel_viz=debug".parse().unwrap())
                    .add_directive("lucky_wheel_core=debug".parse().unwrap()),
            )
            .init();
    }

    let mut data_dir: Option<PathBuf> = None;
    let mut config = WheelConfig::default();

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "-d" => {
                let Some(path) = args.get(i + 1) else {
                    eprintln!("Error: --data-dir requires a path argument");
                    std::process::exit(1);
                };
                data_dir = Some(PathBuf::from(path));
                i += 2;
            }
            "--embedded" => {
                // Pretend to be the in-app browser to exercise the alert paths
                config.user_agent = Some("Mozilla/5.0 MicroMessenger/8.0".to_string());
                i += 1;
            }
            "--help" | "-h" => {
                println!("Lucky Wheel - Native Development Runner");
                println!();
                println!("Usage: native [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --data-dir, -d <PATH>  Persist options to <PATH>/options.json");
                println!("  --embedded             Simulate the embedded browser");
                println!("  --help, -h             Show this help message");
                return Ok(());
            }
            _ => {
                i += 1;
            }
        }
    }

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 640.0])
            .with_title("Lucky Wheel - Development"),
        ..Default::default()
    };

    run_native(
        "Lucky Wheel",
        options,
        Box::new(move |cc| {
            let host = Host::native(&config, data_dir.as_deref());
            Ok(Box::new(LuckyWheelApp::with_host(cc, config, host)))
        }),
    )
}
