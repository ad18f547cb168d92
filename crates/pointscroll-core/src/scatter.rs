use crate::constants::{SCATTER_WOBBLE_DEPTH, SCATTER_WOBBLE_HZ};
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

/// Deterministic per-slot jitter used for the "dissolve" during transitions.
///
/// Each slot gets a random direction inside the unit ball and a phase. The
/// offset at amplitude `a` is `dir * a * wobble(time)`, so amplitude 0 always
/// leaves the cloud untouched. Regenerated whenever the slot count changes;
/// the same seed and count always produce the same field.
#[derive(Clone, Debug, Default)]
pub struct ScatterField {
    dirs: Vec<Vec3>,
    phases: Vec<f32>,
    seed: u64,
}

impl ScatterField {
    pub fn new(slot_count: usize, seed: u64) -> Self {
        let mut field = Self {
            dirs: Vec::new(),
            phases: Vec::new(),
            seed,
        };
        field.resize(slot_count);
        field
    }

    /// Regenerate for a new slot count (no-op when unchanged).
    pub fn resize(&mut self, slot_count: usize) {
        if slot_count == self.dirs.len() {
            return;
        }
        let salt = (slot_count as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut rng = StdRng::seed_from_u64(self.seed ^ salt);
        self.dirs = (0..slot_count)
            .map(|_| {
                // Rejection sample inside the unit ball
                loop {
                    let v = Vec3::new(
                        rng.gen_range(-1.0..=1.0),
                        rng.gen_range(-1.0..=1.0),
                        rng.gen_range(-1.0..=1.0),
                    );
                    if v.length_squared() <= 1.0 {
                        break v;
                    }
                }
            })
            .collect();
        self.phases = (0..slot_count).map(|_| rng.gen::<f32>() * TAU).collect();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    #[inline]
    pub fn offset(&self, i: usize, amplitude: f32, time: f32) -> Vec3 {
        if amplitude == 0.0 {
            return Vec3::ZERO;
        }
        let wobble = 1.0 - SCATTER_WOBBLE_DEPTH
            + SCATTER_WOBBLE_DEPTH * (time * SCATTER_WOBBLE_HZ * TAU + self.phases[i]).sin();
        self.dirs[i] * amplitude * wobble
    }

    /// Add scaled offsets to `positions` in place.
    pub fn apply(&self, positions: &mut [Vec3], amplitude: f32, time: f32) {
        if amplitude == 0.0 {
            return;
        }
        for (i, p) in positions.iter_mut().enumerate().take(self.len()) {
            *p += self.offset(i, amplitude, time);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_field() {
        let a = ScatterField::new(64, 7);
        let b = ScatterField::new(64, 7);
        for i in 0..64 {
            assert_eq!(a.offset(i, 1.0, 0.3), b.offset(i, 1.0, 0.3));
        }
    }

    #[test]
    fn zero_amplitude_is_identity() {
        let field = ScatterField::new(8, 1);
        let mut pts = vec![Vec3::ONE; 8];
        field.apply(&mut pts, 0.0, 12.0);
        assert!(pts.iter().all(|p| *p == Vec3::ONE));
    }

    #[test]
    fn offsets_stay_within_amplitude() {
        let field = ScatterField::new(128, 3);
        for i in 0..128 {
            assert!(field.offset(i, 2.0, 1.7).length() <= 2.0 + 1e-4);
        }
    }
}
