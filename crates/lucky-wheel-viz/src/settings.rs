//! Visual settings for the wheel.

use egui::Color32;

use lucky_wheel_core::SEGMENT_COUNT;

/// Colors and proportions used when painting the wheel.
#[derive(Debug, Clone)]
pub struct WheelStyle {
    /// Fill per segment, clockwise from the pointer.
    pub segment_fills: [Color32; SEGMENT_COUNT],
    /// Segment label color.
    pub label_color: Color32,
    /// Label font size in points.
    pub label_size: f32,
    /// Outer rim stroke.
    pub rim: egui::Stroke,
    /// Pointer fill.
    pub pointer_fill: Color32,
    /// Wheel radius as a fraction of the available square.
    pub radius_fraction: f32,
    /// Radius of the hub cap as a fraction of the wheel radius.
    pub hub_fraction: f32,
}

impl Default for WheelStyle {
    fn default() -> Self {
        Self::for_mode(true)
    }
}

impl WheelStyle {
    /// Palette tuned for the current theme.
    pub fn for_mode(dark_mode: bool) -> Self {
        let segment_fills = [
            Color32::from_rgb(255, 107, 107),
            Color32::from_rgb(255, 169, 77),
            Color32::from_rgb(255, 212, 59),
            Color32::from_rgb(105, 219, 124),
            Color32::from_rgb(56, 217, 169),
            Color32::from_rgb(77, 171, 247),
            Color32::from_rgb(132, 94, 247),
            Color32::from_rgb(240, 101, 149),
        ];
        let (rim, pointer_fill) = if dark_mode {
            (Color32::from_rgb(230, 230, 240), Color32::from_rgb(255, 255, 255))
        } else {
            (Color32::from_rgb(60, 60, 70), Color32::from_rgb(40, 40, 50))
        };

        Self {
            segment_fills,
            label_color: Color32::from_rgb(30, 30, 30),
            label_size: 16.0,
            rim: egui::Stroke::new(4.0, rim),
            pointer_fill,
            radius_fraction: 0.45,
            hub_fraction: 0.12,
        }
    }
}
