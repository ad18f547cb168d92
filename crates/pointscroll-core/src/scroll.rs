//! Conversion of raw wheel/touch deltas into section-advance triggers and
//! phase progress.

use crate::constants::{
    TOUCH_PROGRESS_SCALE, TOUCH_THRESHOLD, WHEEL_PROGRESS_SCALE, WHEEL_THRESHOLD,
};

/// Which device produced a delta. Touch moves report much smaller deltas per
/// event than wheel notches, so each kind has its own tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Wheel,
    Touch,
}

/// Transition direction. Forward moves to the next section, backward to the
/// previous one (both wrap around).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn from_delta(delta: f32) -> Self {
        if delta < 0.0 {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    /// Section index one step away from `index` in this direction.
    #[inline]
    pub fn step(self, index: usize, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        match self {
            Direction::Forward => (index + 1) % count,
            Direction::Backward => (index + count - 1) % count,
        }
    }
}

/// Threshold (delta needed to start a transition) and progress scale (delta
/// worth one full phase) for one input kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTuning {
    pub threshold: f32,
    pub progress_scale: f32,
}

impl ScrollTuning {
    pub const WHEEL: ScrollTuning = ScrollTuning {
        threshold: WHEEL_THRESHOLD,
        progress_scale: WHEEL_PROGRESS_SCALE,
    };
    pub const TOUCH: ScrollTuning = ScrollTuning {
        threshold: TOUCH_THRESHOLD,
        progress_scale: TOUCH_PROGRESS_SCALE,
    };

    /// Signed phase progress for a raw delta, relative to `direction`.
    #[inline]
    pub fn progress_delta(&self, delta: f32, direction: Direction) -> f32 {
        delta / self.progress_scale.max(1e-3) * direction.sign()
    }

    /// Raw delta that would produce `progress` in `direction`.
    #[inline]
    pub fn delta_for_progress(&self, progress: f32, direction: Direction) -> f32 {
        progress * self.progress_scale * direction.sign()
    }
}

/// Result of crossing the idle threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollTrigger {
    pub direction: Direction,
    /// Overshoot beyond the threshold, converted to fade-out progress (≤ 1).
    pub initial_progress: f32,
    /// Progress that did not fit into the first phase.
    pub carry: f32,
}

/// Idle-phase accumulator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollAccumulator {
    accum: f32,
}

impl ScrollAccumulator {
    #[inline]
    pub fn value(&self) -> f32 {
        self.accum
    }

    pub fn reset(&mut self) {
        self.accum = 0.0;
    }

    /// Add a delta while idle. Once the magnitude reaches the threshold the
    /// threshold's worth is consumed, the overshoot becomes initial progress,
    /// and the accumulator resets. A sign flip discards what was gathered in
    /// the old direction.
    pub fn accumulate_idle(&mut self, delta: f32, tuning: &ScrollTuning) -> Option<ScrollTrigger> {
        if delta == 0.0 || !delta.is_finite() {
            return None;
        }
        if self.accum != 0.0 && self.accum.signum() != delta.signum() {
            self.accum = 0.0;
        }
        self.accum += delta;
        if self.accum.abs() < tuning.threshold {
            return None;
        }
        let direction = Direction::from_delta(self.accum);
        let overshoot = self.accum - direction.sign() * tuning.threshold;
        self.accum = 0.0;
        let total = overshoot.abs() / tuning.progress_scale.max(1e-3);
        let initial_progress = total.min(1.0);
        Some(ScrollTrigger {
            direction,
            initial_progress,
            carry: total - initial_progress,
        })
    }
}
