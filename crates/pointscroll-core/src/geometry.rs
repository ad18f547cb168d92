//! Raw point-cloud containers handed over by the loader and the fixed-size
//! slot sets produced from them.

use crate::error::LoadError;
use glam::{EulerRot, Quat, Vec3};
use serde::Deserialize;

/// On-disk point cloud: flat xyz arrays, colours optional and either 0..1 or
/// 0..255 per channel.
#[derive(Debug, Deserialize)]
struct PointCloudDoc {
    positions: Vec<f32>,
    #[serde(default)]
    colors: Option<Vec<f32>>,
}

/// Loader output: positions plus an optional per-point colour attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub colors: Option<Vec<Vec3>>,
}

impl PointCloud {
    /// Build a cloud, dropping a colour attribute whose length disagrees with
    /// the position count.
    pub fn new(positions: Vec<Vec3>, colors: Option<Vec<Vec3>>) -> Self {
        let colors = match colors {
            Some(c) if c.len() != positions.len() => {
                log::warn!(
                    "[assets] colour count {} != position count {}; ignoring colours",
                    c.len(),
                    positions.len()
                );
                None
            }
            other => other,
        };
        Self { positions, colors }
    }

    /// Build from flat `[x, y, z, x, y, z, ...]` arrays as shipped in JSON.
    pub fn from_flat(positions: &[f32], colors: Option<&[f32]>) -> Self {
        let pos = positions
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect::<Vec<_>>();
        let col = colors.map(|c| {
            c.chunks_exact(3)
                .map(|c| Vec3::new(c[0], c[1], c[2]))
                .collect::<Vec<_>>()
        });
        Self::new(pos, col)
    }

    /// Decode a `{ "positions": [..], "colors": [..] }` document fetched
    /// from `path`.
    pub fn from_json(path: &str, json: &str) -> Result<Self, LoadError> {
        let doc: PointCloudDoc = serde_json::from_str(json).map_err(|e| LoadError::Parse {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        if doc.positions.len() % 3 != 0 {
            return Err(LoadError::Parse {
                path: path.to_string(),
                reason: format!("{} position floats is not a multiple of 3", doc.positions.len()),
            });
        }
        if doc.positions.iter().any(|v| !v.is_finite()) {
            return Err(LoadError::Parse {
                path: path.to_string(),
                reason: "non-finite position".to_string(),
            });
        }
        let colors = doc.colors.map(|mut c| {
            if c.iter().any(|v| *v > 1.0) {
                c.iter_mut().for_each(|v| *v /= 255.0);
            }
            c
        });
        let cloud = Self::from_flat(&doc.positions, colors.as_deref());
        if cloud.is_empty() {
            return Err(LoadError::Empty(path.to_string()));
        }
        Ok(cloud)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn has_colors(&self) -> bool {
        self.colors.is_some()
    }
}

/// A resample result with exactly `positions.len()` slots.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlotSet {
    pub positions: Vec<Vec3>,
    pub colors: Option<Vec<Vec3>>,
}

impl SlotSet {
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Apply a section transform to every slot position in place.
    pub fn transform(mut self, t: &SectionTransform) -> Self {
        if !t.is_identity() {
            for p in &mut self.positions {
                *p = t.apply(*p);
            }
        }
        self
    }
}

/// Per-section placement baked into slot positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionTransform {
    pub rotation_deg: Vec3,
    pub scale: f32,
    pub offset: Vec3,
}

impl Default for SectionTransform {
    fn default() -> Self {
        Self {
            rotation_deg: Vec3::ZERO,
            scale: 1.0,
            offset: Vec3::ZERO,
        }
    }
}

impl SectionTransform {
    pub fn is_identity(&self) -> bool {
        self.rotation_deg == Vec3::ZERO && self.scale == 1.0 && self.offset == Vec3::ZERO
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_deg.x.to_radians(),
            self.rotation_deg.y.to_radians(),
            self.rotation_deg.z.to_radians(),
        )
    }

    /// Scale, then rotate, then offset.
    #[inline]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        self.rotation() * (p * self.scale) + self.offset
    }
}

/// Largest distance from the centroid; 1.0 for an empty slice so camera
/// scaling never collapses to zero.
pub fn bounding_radius(points: &[Vec3]) -> f32 {
    if points.is_empty() {
        return 1.0;
    }
    let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
    let r = points
        .iter()
        .map(|p| p.distance(centroid))
        .fold(0.0_f32, f32::max);
    if r > 1e-6 {
        r
    } else {
        1.0
    }
}
