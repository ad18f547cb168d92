//! Deterministic downsampling and cross-resampling between point clouds.
//!
//! A cloud is reduced to `keep_count` slots by strided index sampling. Each
//! slot remembers the fractional position (0..1) of the source point it came
//! from; any other cloud can then be mapped onto the same slots by looking up
//! the point at the same fraction, which is what lets two clouds of different
//! native sizes morph into each other slot by slot.

use crate::constants::{DENSITY_MIN, IDENTITY_RATIO};
use crate::geometry::{PointCloud, SlotSet};

/// Source index represented by output slot `i`. The last slot always maps to
/// the last source point.
#[inline]
fn source_index(i: usize, source_count: usize, keep_count: usize) -> usize {
    if i + 1 == keep_count {
        return source_count - 1;
    }
    let idx = (i as f64 * source_count as f64 / keep_count as f64).floor() as usize;
    idx.min(source_count - 1)
}

/// Fraction table for `keep_count` slots drawn from a cloud of `source_count`
/// points. Empty when either count is zero.
pub fn compute_sample_fractions(source_count: usize, keep_count: usize) -> Vec<f64> {
    if source_count == 0 || keep_count == 0 {
        return Vec::new();
    }
    let denom = (source_count - 1) as f64;
    (0..keep_count)
        .map(|i| {
            if source_count == 1 {
                0.0
            } else {
                source_index(i, source_count, keep_count) as f64 / denom
            }
        })
        .collect()
}

/// Pull `keep_count` representative points (and colours, when present) out of
/// `source` using the same index mapping as [`compute_sample_fractions`].
pub fn resample_positions_and_colors(source: &PointCloud, keep_count: usize) -> Option<SlotSet> {
    let n = source.len();
    if n == 0 || keep_count == 0 {
        return None;
    }
    let indices = (0..keep_count).map(|i| source_index(i, n, keep_count));
    let positions = indices.clone().map(|s| source.positions[s]).collect();
    let colors = source
        .colors
        .as_ref()
        .map(|c| indices.map(|s| c[s]).collect());
    Some(SlotSet { positions, colors })
}

/// Map `target` onto the slots described by `fractions`: slot `i` takes the
/// target point nearest to the same relative position.
pub fn resample_target_by_fractions(target: &PointCloud, fractions: &[f64]) -> Option<SlotSet> {
    let n = target.len();
    if n == 0 || fractions.is_empty() {
        return None;
    }
    let last = (n - 1) as f64;
    let index_of = |f: f64| ((f * last).round().max(0.0) as usize).min(n - 1);
    let positions = fractions
        .iter()
        .map(|&f| target.positions[index_of(f)])
        .collect();
    let colors = target
        .colors
        .as_ref()
        .map(|c| fractions.iter().map(|&f| c[index_of(f)]).collect());
    Some(SlotSet { positions, colors })
}

/// Slot count for a cloud of `source_count` points at density `ratio`,
/// capped at `max_points`. Ratios at or above the identity threshold keep
/// every point.
pub fn keep_count_for(source_count: usize, ratio: f32, max_points: usize) -> usize {
    if source_count == 0 {
        return 0;
    }
    let cap = max_points.max(1).min(source_count);
    let ratio = ratio.clamp(DENSITY_MIN, 1.0);
    if ratio >= IDENTITY_RATIO {
        return cap;
    }
    let keep = (source_count as f64 * ratio as f64).round() as usize;
    keep.clamp(1, cap)
}
