use serde::Deserialize;
use std::f32::consts::PI;

/// Progress easing curve applied to phase progress before it drives rotation,
/// scatter, camera, background and text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ease {
    Linear,
    #[default]
    Cubic,
    Sine,
}

impl Ease {
    /// Map `t` (clamped to 0..1) through the curve. Every curve fixes 0 and 1.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Cubic => ease_in_out_cubic(t),
            Ease::Sine => 0.5 - 0.5 * (PI * t).cos(),
        }
    }
}

#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// Frame-rate independent exponential approach step: the fraction of the
/// remaining distance to cover this frame, never more than one full step.
#[inline]
pub fn approach_factor(rate: f32, dt_sec: f32) -> f32 {
    (rate * dt_sec.max(0.0)).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_fix_endpoints_and_are_monotonic() {
        for ease in [Ease::Linear, Ease::Cubic, Ease::Sine] {
            assert!(ease.apply(0.0).abs() < 1e-6);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6);
            let mut prev = 0.0;
            for i in 1..=100 {
                let v = ease.apply(i as f32 / 100.0);
                assert!(v >= prev - 1e-6, "{ease:?} not monotonic at {i}");
                prev = v;
            }
        }
    }

    #[test]
    fn approach_never_overshoots() {
        assert_eq!(approach_factor(4.0, 10.0), 1.0);
        assert_eq!(approach_factor(4.0, -1.0), 0.0);
        assert!((approach_factor(4.0, 0.1) - 0.4).abs() < 1e-6);
    }
}
