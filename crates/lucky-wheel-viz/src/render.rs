//! Wheel geometry, painting and the spin transition.

use std::time::Duration;

use egui::{Align2, FontId, Painter, Pos2, Shape, Stroke, Vec2};
use lucky_wheel_core::{Instant, OptionSet, SEGMENT_COUNT, SEGMENT_DEGREES};

use crate::settings::WheelStyle;

/// Arc points per segment edge.
const ARC_STEPS: usize = 12;

/// Unit vector for an angle in degrees measured clockwise from the top.
pub fn direction(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.sin(), -rad.cos())
}

/// Segment resting under the pointer for a wheel rotated clockwise by `rotation_deg`.
pub fn segment_under_pointer(rotation_deg: f64) -> usize {
    let wheel_angle = (-rotation_deg).rem_euclid(360.0);
    (wheel_angle / SEGMENT_DEGREES).floor() as usize % SEGMENT_COUNT
}

/// Pie slice for segment `index` on a wheel rotated by `rotation_deg`.
pub fn segment_polygon(center: Pos2, radius: f32, index: usize, rotation_deg: f32) -> Vec<Pos2> {
    let width = SEGMENT_DEGREES as f32;
    let start = index as f32 * width + rotation_deg;
    let mut points = Vec::with_capacity(ARC_STEPS + 2);
    points.push(center);
    for step in 0..=ARC_STEPS {
        let angle = start + width * step as f32 / ARC_STEPS as f32;
        points.push(center + direction(angle) * radius);
    }
    points
}

/// Paint segments, labels, rim and hub.
pub fn paint_wheel(
    painter: &Painter,
    center: Pos2,
    radius: f32,
    rotation_deg: f32,
    options: &OptionSet,
    style: &WheelStyle,
) {
    let width = SEGMENT_DEGREES as f32;

    for (index, label) in options.iter().enumerate() {
        let fill = style.segment_fills[index % style.segment_fills.len()];
        painter.add(Shape::convex_polygon(
            segment_polygon(center, radius, index, rotation_deg),
            fill,
            Stroke::new(1.0, fill.gamma_multiply(0.7)),
        ));

        let mid = index as f32 * width + width / 2.0 + rotation_deg;
        painter.text(
            center + direction(mid) * radius * 0.66,
            Align2::CENTER_CENTER,
            label,
            FontId::proportional(style.label_size),
            style.label_color,
        );
    }

    painter.circle_stroke(center, radius, style.rim);
    painter.circle_filled(center, radius * style.hub_fraction, style.rim.color);
}

/// Fixed pointer at the top of the wheel, pointing down into it.
pub fn paint_pointer(painter: &Painter, center: Pos2, radius: f32, style: &WheelStyle) {
    let tip = center + direction(0.0) * (radius * 0.88);
    let half_width = radius * 0.07;
    let base_y = center.y - radius - radius * 0.08;
    painter.add(Shape::convex_polygon(
        vec![
            Pos2::new(tip.x - half_width, base_y),
            Pos2::new(tip.x + half_width, base_y),
            tip,
        ],
        style.pointer_fill,
        Stroke::new(1.5, style.rim.color.gamma_multiply(0.6)),
    ));
}

/// Cubic ease-out.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Single continuous transition between two absolute rotations.
#[derive(Debug, Clone, Copy)]
pub struct SpinAnimation {
    pub from: f64,
    pub to: f64,
    pub started: Instant,
    pub duration: Duration,
}

impl SpinAnimation {
    /// Rotation at `now`.
    pub fn angle_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f64();
        let t = elapsed / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucky_wheel_core::target_angle;

    #[test]
    fn test_target_angle_lands_on_chosen_segment() {
        for index in 0..SEGMENT_COUNT {
            for turns in [1, 5] {
                assert_eq!(segment_under_pointer(target_angle(index, turns)), index);
            }
        }
    }

    #[test]
    fn test_direction_is_clockwise_from_top() {
        let up = direction(0.0);
        assert!(up.x.abs() < 1e-6 && (up.y + 1.0).abs() < 1e-6);
        let right = direction(90.0);
        assert!((right.x - 1.0).abs() < 1e-6 && right.y.abs() < 1e-6);
    }

    #[test]
    fn test_segment_polygon_spans_one_segment() {
        let center = Pos2::new(100.0, 100.0);
        let points = segment_polygon(center, 50.0, 0, 0.0);
        assert_eq!(points.len(), ARC_STEPS + 2);
        assert_eq!(points[0], center);
        // First arc point straight up, last one 45 degrees clockwise.
        assert!((points[1] - Pos2::new(100.0, 50.0)).length() < 1e-3);
        let last = points[points.len() - 1];
        assert!((last - (center + direction(45.0) * 50.0)).length() < 1e-3);
    }

    #[test]
    fn test_animation_interpolates_and_settles() {
        let start = Instant::now();
        let anim = SpinAnimation {
            from: 0.0,
            to: 2002.5,
            started: start,
            duration: Duration::from_millis(5000),
        };
        assert_eq!(anim.angle_at(start), 0.0);
        let mid = anim.angle_at(start + Duration::from_millis(2500));
        assert!(mid > 1001.25 && mid < 2002.5);
        assert_eq!(anim.angle_at(start + Duration::from_millis(5000)), 2002.5);
        assert_eq!(anim.angle_at(start + Duration::from_secs(9)), 2002.5);
        assert!(anim.is_finished(start + Duration::from_millis(5000)));
        assert!(!anim.is_finished(start + Duration::from_millis(10)));
    }

    #[test]
    fn test_ease_out_bounds() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
    }
}
