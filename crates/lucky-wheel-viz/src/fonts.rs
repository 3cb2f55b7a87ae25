//! CJK fallback font.
//!
//! egui's bundled fonts have no Chinese glyphs, so labels and dialog text
//! need a fallback face installed before the first frame.

use std::sync::Arc;

use egui::{Context, FontData, FontDefinitions, FontFamily};

const FALLBACK_NAME: &str = "cjk-fallback";

/// System locations probed on native builds, first hit wins.
#[cfg(not(target_arch = "wasm32"))]
const SYSTEM_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
];

/// Font definitions with `data` appended as a fallback to both families.
pub fn with_fallback(data: Vec<u8>) -> FontDefinitions {
    let mut fonts = FontDefinitions::default();
    fonts.font_data.insert(
        FALLBACK_NAME.to_owned(),
        Arc::new(FontData::from_owned(data)),
    );
    for family in [FontFamily::Proportional, FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(FALLBACK_NAME.to_owned());
    }
    fonts
}

/// Install `data` as the fallback face.
pub fn install_fallback(ctx: &Context, data: Vec<u8>) {
    ctx.set_fonts(with_fallback(data));
}

/// Read the first CJK-capable system font that exists.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_system_fallback() -> Option<Vec<u8>> {
    SYSTEM_CANDIDATES.iter().find_map(|path| {
        let data = std::fs::read(path).ok()?;
        tracing::debug!(path, "Loaded fallback font");
        Some(data)
    })
}

/// Install a system CJK font if one can be found.
#[cfg(not(target_arch = "wasm32"))]
pub fn install_system_fallback(ctx: &Context) {
    match load_system_fallback() {
        Some(data) => install_fallback(ctx, data),
        None => tracing::warn!("No CJK font found, labels may not render"),
    }
}

/// Served next to the web build.
#[cfg(target_arch = "wasm32")]
pub const WEB_FONT_PATH: &str = "fonts/cjk-fallback.ttf";

/// Fetch [`WEB_FONT_PATH`] in the background and install it when it arrives.
#[cfg(target_arch = "wasm32")]
pub fn fetch_web_fallback(ctx: &Context) {
    let ctx = ctx.clone();
    wasm_bindgen_futures::spawn_local(async move {
        match fetch_bytes(WEB_FONT_PATH).await {
            Ok(data) => {
                install_fallback(&ctx, data);
                ctx.request_repaint();
            }
            Err(err) => tracing::warn!(path = WEB_FONT_PATH, error = %err, "Could not load fallback font"),
        }
    });
}

#[cfg(target_arch = "wasm32")]
async fn fetch_bytes(path: &str) -> Result<Vec<u8>, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let window = web_sys::window().ok_or("no window")?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(|err| format!("{:?}", err))?
        .dyn_into()
        .map_err(|_| "fetch did not return a Response".to_string())?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    let promise = response.array_buffer().map_err(|err| format!("{:?}", err))?;
    let buffer = JsFuture::from(promise)
        .await
        .map_err(|err| format!("{:?}", err))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}
