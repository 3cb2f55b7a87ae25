//! Spin lifecycle: selection, target angle and the completion task.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::options::{OptionSet, SEGMENT_COUNT};
use crate::Instant;

/// Angular width of one segment.
pub const SEGMENT_DEGREES: f64 = 360.0 / SEGMENT_COUNT as f64;

/// Half a segment; centers the pointer on the chosen segment.
pub const HALF_SEGMENT_DEGREES: f64 = SEGMENT_DEGREES / 2.0;

/// Absolute wheel rotation (degrees, clockwise) that rests segment `index`
/// under the pointer at the top after `extra_rotations` full turns.
///
/// The result modulo 360 depends only on `index`.
pub fn target_angle(index: usize, extra_rotations: u32) -> f64 {
    let offset = 360.0 - index as f64 * SEGMENT_DEGREES - HALF_SEGMENT_DEGREES;
    360.0 * f64::from(extra_rotations) + offset
}

/// Source of the uniformly drawn segment index.
pub trait IndexSource {
    /// Draw an index in `0..upper`.
    fn next_index(&mut self, upper: usize) -> usize;
}

/// Thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIndex;

impl IndexSource for RandomIndex {
    fn next_index(&mut self, upper: usize) -> usize {
        rand::rng().random_range(0..upper)
    }
}

impl<F: FnMut(usize) -> usize> IndexSource for F {
    fn next_index(&mut self, upper: usize) -> usize {
        self(upper)
    }
}

/// Spin lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpinState {
    #[default]
    Idle,
    Spinning,
}

/// Identity of a scheduled completion task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// One-shot timer that ends a spin. Not cancellable once scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: TaskId,
    pub due_at: Instant,
    /// Segment revealed when the task fires.
    pub index: usize,
}

/// Returned when a spin starts; the renderer animates towards `target_angle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinPlan {
    pub task: ScheduledTask,
    pub index: usize,
    pub target_angle: f64,
    pub duration: Duration,
}

/// Returned when the completion task fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinOutcome {
    pub task: TaskId,
    pub index: usize,
    pub label: String,
}

/// Owns the Idle → Spinning → Idle state machine.
pub struct WheelController<R> {
    state: SpinState,
    source: R,
    extra_rotations: u32,
    duration: Duration,
    next_task: u64,
    active: Option<ScheduledTask>,
    rotation: f64,
}

impl<R: IndexSource> WheelController<R> {
    pub fn new(source: R, extra_rotations: u32, duration: Duration) -> Self {
        Self {
            state: SpinState::Idle,
            source,
            extra_rotations,
            duration,
            next_task: 0,
            active: None,
            rotation: 0.0,
        }
    }

    pub fn state(&self) -> SpinState {
        self.state
    }

    pub fn is_spinning(&self) -> bool {
        self.state == SpinState::Spinning
    }

    /// Rotation most recently applied to the wheel.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn active_task(&self) -> Option<&ScheduledTask> {
        self.active.as_ref()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Start a spin. Ignored (returns `None`) while a spin is in flight.
    pub fn spin(&mut self, now: Instant) -> Option<SpinPlan> {
        if self.is_spinning() {
            debug!("Spin requested while spinning, ignored");
            return None;
        }

        let index = self.source.next_index(SEGMENT_COUNT).min(SEGMENT_COUNT - 1);
        let target = target_angle(index, self.extra_rotations);

        self.next_task += 1;
        let task = ScheduledTask {
            id: TaskId(self.next_task),
            due_at: now + self.duration,
            index,
        };

        self.state = SpinState::Spinning;
        self.active = Some(task);
        self.rotation = target;
        info!(index, target_angle = target, task = task.id.0, "Spin started");

        Some(SpinPlan {
            task,
            index,
            target_angle: target,
            duration: self.duration,
        })
    }

    /// Fire the completion task if it is due, unlocking the wheel.
    pub fn poll(&mut self, now: Instant, options: &OptionSet) -> Option<SpinOutcome> {
        let task = self.active?;
        if now < task.due_at {
            return None;
        }

        self.active = None;
        self.state = SpinState::Idle;
        let label = options.get(task.index).unwrap_or_default().to_string();
        info!(index = task.index, label = %label, task = task.id.0, "Spin finished");

        Some(SpinOutcome {
            task: task.id,
            index: task.index,
            label,
        })
    }

    /// Time left until the active task fires.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.active.map(|task| task.due_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(index: usize) -> impl FnMut(usize) -> usize {
        move |_: usize| index
    }

    #[test]
    fn test_target_angle_rests_on_segment_for_any_turns() {
        for index in 0..SEGMENT_COUNT {
            let expected = (360.0 - index as f64 * 45.0 - 22.5).rem_euclid(360.0);
            for turns in [1, 2, 5, 10] {
                let angle = target_angle(index, turns);
                assert!((angle.rem_euclid(360.0) - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_target_angle_index_three() {
        assert_eq!(target_angle(3, 5), 2002.5);
        assert_eq!(target_angle(0, 5), 2137.5);
        assert_eq!(target_angle(7, 5), 1822.5);
    }

    #[test]
    fn test_random_index_stays_in_range() {
        let mut source = RandomIndex;
        for _ in 0..200 {
            assert!(source.next_index(SEGMENT_COUNT) < SEGMENT_COUNT);
        }
    }

    #[test]
    fn test_spin_lifecycle() {
        let options = OptionSet::default();
        let mut wheel = WheelController::new(fixed(3), 5, Duration::from_millis(5000));
        let start = Instant::now();

        let plan = wheel.spin(start).unwrap();
        assert_eq!(plan.index, 3);
        assert_eq!(plan.target_angle, 2002.5);
        assert!(wheel.is_spinning());
        assert_eq!(wheel.rotation(), 2002.5);

        // Not due yet.
        assert!(wheel.poll(start + Duration::from_millis(4999), &options).is_none());
        assert!(wheel.is_spinning());

        let outcome = wheel.poll(start + Duration::from_millis(5000), &options).unwrap();
        assert_eq!(outcome.label, "选项4");
        assert_eq!(outcome.task, plan.task.id);
        assert_eq!(wheel.state(), SpinState::Idle);
        assert!(wheel.active_task().is_none());

        // Fires once.
        assert!(wheel.poll(start + Duration::from_secs(10), &options).is_none());
    }

    #[test]
    fn test_spin_while_spinning_is_ignored() {
        let mut draws = 0;
        let source = |_: usize| {
            draws += 1;
            2
        };
        let mut wheel = WheelController::new(source, 5, Duration::from_millis(5000));
        let start = Instant::now();

        let first = wheel.spin(start).unwrap();
        assert!(wheel.spin(start + Duration::from_millis(100)).is_none());
        assert_eq!(wheel.rotation(), first.target_angle);
        assert_eq!(wheel.active_task().unwrap().id, first.task.id);
        assert_eq!(wheel.active_task().unwrap().due_at, first.task.due_at);
        drop(wheel);
        assert_eq!(draws, 1);
    }

    #[test]
    fn test_task_ids_are_unique() {
        let options = OptionSet::default();
        let mut wheel = WheelController::new(fixed(0), 1, Duration::from_millis(10));
        let start = Instant::now();

        let a = wheel.spin(start).unwrap().task.id;
        wheel.poll(start + Duration::from_millis(10), &options).unwrap();
        let b = wheel.spin(start + Duration::from_millis(20)).unwrap().task.id;
        assert_ne!(a, b);
    }

    #[test]
    fn test_remaining_time() {
        let mut wheel = WheelController::new(fixed(1), 5, Duration::from_millis(5000));
        let start = Instant::now();
        assert!(wheel.remaining(start).is_none());
        wheel.spin(start);
        assert_eq!(
            wheel.remaining(start + Duration::from_millis(1000)),
            Some(Duration::from_millis(4000))
        );
    }
}
