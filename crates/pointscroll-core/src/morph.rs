//! Per-slot morph storage: the displayed base state, the pending morph
//! target, and the two blend signals the renderer interpolates with.

use crate::geometry::SlotSet;
use glam::Vec3;

/// Fixed-length base/target buffers for the currently displayed cloud.
///
/// All four arrays always share the same length `N` (the slot count). A morph
/// target of any other length is ignored; stale resamples built for an older
/// slot count must never corrupt the buffer.
#[derive(Clone, Debug, Default)]
pub struct MorphBuffer {
    base_positions: Vec<Vec3>,
    base_colors: Vec<Vec3>,
    morph_positions: Vec<Vec3>,
    morph_colors: Vec<Vec3>,
    position_blend: f32,
    color_blend: f32,
    has_target: bool,
}

impl MorphBuffer {
    /// Replace the base with `slots`, clearing any morph target. Slots without
    /// colours are tinted with `fallback_color`.
    pub fn reset(&mut self, slots: SlotSet, fallback_color: Vec3) {
        let n = slots.len();
        self.base_colors = slots.colors.unwrap_or_else(|| vec![fallback_color; n]);
        self.base_positions = slots.positions;
        self.clear_morph_target();
    }

    /// Slot count `N`.
    #[inline]
    pub fn len(&self) -> usize {
        self.base_positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.base_positions.is_empty()
    }

    #[inline]
    pub fn has_target(&self) -> bool {
        self.has_target
    }

    /// Install a morph target. Returns `false` (and leaves the buffer alone)
    /// when `positions` does not have exactly `N` entries. Missing or
    /// mis-sized colours fall back to the base colours.
    pub fn set_morph_target(&mut self, positions: &[Vec3], colors: Option<&[Vec3]>) -> bool {
        if positions.len() != self.len() || self.is_empty() {
            log::debug!(
                "[morph] ignoring target of {} slots (buffer has {})",
                positions.len(),
                self.len()
            );
            return false;
        }
        self.morph_positions.clear();
        self.morph_positions.extend_from_slice(positions);
        self.morph_colors.clear();
        match colors {
            Some(c) if c.len() == positions.len() => self.morph_colors.extend_from_slice(c),
            _ => self.morph_colors.extend_from_slice(&self.base_colors),
        }
        self.has_target = true;
        true
    }

    /// Drop the morph target so the buffer shows its base again.
    pub fn clear_morph_target(&mut self) {
        self.morph_positions.clone_from(&self.base_positions);
        self.morph_colors.clone_from(&self.base_colors);
        self.position_blend = 0.0;
        self.color_blend = 0.0;
        self.has_target = false;
    }

    /// Drive both blend signals with the same value.
    pub fn set_blend(&mut self, factor: f32) {
        let f = factor.clamp(0.0, 1.0);
        self.position_blend = f;
        self.color_blend = f;
    }

    pub fn set_position_blend(&mut self, factor: f32) {
        self.position_blend = factor.clamp(0.0, 1.0);
    }

    pub fn set_color_blend(&mut self, factor: f32) {
        self.color_blend = factor.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn position_blend(&self) -> f32 {
        self.position_blend
    }

    #[inline]
    pub fn color_blend(&self) -> f32 {
        self.color_blend
    }

    /// Promote the morph target to the new base and reset both blends to 0.
    /// Colours take their effective blended value; positions take the morph
    /// position. Required after every completed morph so the next one starts
    /// from what is on screen, not from the original base.
    pub fn commit(&mut self) {
        if self.has_target {
            for i in 0..self.len() {
                self.base_colors[i] = self.blended_color(i);
            }
            std::mem::swap(&mut self.base_positions, &mut self.morph_positions);
        }
        self.clear_morph_target();
    }

    #[inline]
    pub fn blended_position(&self, i: usize) -> Vec3 {
        self.base_positions[i].lerp(self.morph_positions[i], self.position_blend)
    }

    #[inline]
    pub fn blended_color(&self, i: usize) -> Vec3 {
        self.base_colors[i].lerp(self.morph_colors[i], self.color_blend)
    }

    #[inline]
    pub fn base_positions(&self) -> &[Vec3] {
        &self.base_positions
    }

    #[inline]
    pub fn base_colors(&self) -> &[Vec3] {
        &self.base_colors
    }

    /// Write the interpolated positions and colours into reusable buffers.
    pub fn write_blended(&self, positions: &mut Vec<Vec3>, colors: &mut Vec<Vec3>) {
        positions.clear();
        colors.clear();
        positions.extend((0..self.len()).map(|i| self.blended_position(i)));
        colors.extend((0..self.len()).map(|i| self.blended_color(i)));
    }
}
