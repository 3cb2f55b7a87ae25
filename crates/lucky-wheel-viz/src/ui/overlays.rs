//! Overlays painted on top of the wheel.

use egui::{Color32, Painter, Pos2, Shape, Stroke};

use crate::render::{direction, segment_polygon};

/// Highlight color for the winning segment.
fn result_highlight_color(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgba_unmultiplied(255, 255, 255, 60)
    } else {
        Color32::from_rgba_unmultiplied(255, 255, 255, 90)
    }
}

/// Brighten the segment that won the last spin.
pub fn draw_result_highlight(
    painter: &Painter,
    center: Pos2,
    radius: f32,
    index: usize,
    rotation_deg: f32,
    dark_mode: bool,
) {
    painter.add(Shape::convex_polygon(
        segment_polygon(center, radius, index, rotation_deg),
        result_highlight_color(dark_mode),
        Stroke::new(2.0, Color32::WHITE),
    ));
}

/// Arc around the rim filling up while the reset gesture is held.
pub fn draw_press_progress(
    painter: &Painter,
    center: Pos2,
    radius: f32,
    progress: f32,
    dark_mode: bool,
) {
    if progress <= 0.0 {
        return;
    }
    let color = if dark_mode {
        Color32::from_rgb(255, 120, 120)
    } else {
        Color32::from_rgb(200, 50, 50)
    };
    let ring = radius + 8.0;
    let sweep = 360.0 * progress.clamp(0.0, 1.0);
    let steps = (sweep / 4.0).ceil().max(1.0) as usize;
    let points: Vec<Pos2> = (0..=steps)
        .map(|step| center + direction(sweep * step as f32 / steps as f32) * ring)
        .collect();
    painter.add(Shape::line(points, Stroke::new(4.0, color)));
}
