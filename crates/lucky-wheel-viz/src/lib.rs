//! egui front-end for the lucky wheel.
//!
//! The same app runs natively (via eframe) and in the browser (via WASM),
//! where it persists to `localStorage`, speaks results through the Web
//! Speech API and registers an offline caching worker.

mod app;
mod controls;
mod dialogs;
mod fonts;
mod platform;
mod render;
mod settings;
mod ui;

pub use app::LuckyWheelApp;
pub use platform::Host;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Canvas element the web build renders into.
pub const CANVAS_ID: &str = "lucky-wheel-canvas";

/// Start the app in WASM context.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    // Better panic messages in the browser console
    console_error_panic_hook::set_once();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let Some(canvas) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CANVAS_ID))
            .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
        else {
            web_sys::console::error_1(&format!("Canvas #{} not found", CANVAS_ID).into());
            return;
        };

        let started = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(LuckyWheelApp::new(cc)))),
            )
            .await;
        if let Err(err) = started {
            web_sys::console::error_1(&format!("Failed to start eframe: {:?}", err).into());
        }
    });
}
