//! Lazily populated per-section asset cache.
//!
//! Geometry, once loaded, lives for the lifetime of the cache. Morph arrays
//! (a section's cloud cross-resampled onto the displayed slots) are stamped
//! with the fraction table they were built from and thrown away whenever the
//! displayed cloud is rebuilt.

use crate::geometry::{PointCloud, SectionTransform, SlotSet};
use crate::resample::resample_target_by_fractions;
use fnv::{FnvHashMap, FnvHasher};
use std::hash::Hasher;
use std::rc::Rc;

/// Identity of one geometry request. A resolution is acted upon only while
/// its ticket is still the one the state machine is waiting for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LoadTicket {
    pub section: usize,
    pub generation: u64,
}

/// Outbound request for the host to fetch a section's geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub ticket: LoadTicket,
    pub path: String,
}

/// A section cloud resampled onto a specific slot layout.
#[derive(Clone, Debug)]
pub struct MorphArray {
    /// `fraction_key` of the table the slots were sampled with.
    pub key: u64,
    pub slots: SlotSet,
}

/// Identity of a sample-fraction table: slot count plus the fraction bits.
pub fn fraction_key(fractions: &[f64]) -> u64 {
    let mut h = FnvHasher::default();
    h.write_usize(fractions.len());
    for f in fractions {
        h.write_u64(f.to_bits());
    }
    h.finish()
}

#[derive(Clone, Debug, Default)]
pub struct SectionAsset {
    pub geometry: Option<Rc<PointCloud>>,
    pub morph: Option<MorphArray>,
    pub in_flight: Option<LoadTicket>,
}

#[derive(Debug, Default)]
pub struct AssetCache {
    entries: FnvHashMap<String, SectionAsset>,
}

impl AssetCache {
    /// Entry for `id`, created on first reference.
    pub fn entry(&mut self, id: &str) -> &mut SectionAsset {
        self.entries.entry(id.to_string()).or_default()
    }

    pub fn get(&self, id: &str) -> Option<&SectionAsset> {
        self.entries.get(id)
    }

    pub fn geometry(&self, id: &str) -> Option<Rc<PointCloud>> {
        self.entries.get(id).and_then(|a| a.geometry.clone())
    }

    #[inline]
    pub fn is_loaded(&self, id: &str) -> bool {
        self.entries.get(id).is_some_and(|a| a.geometry.is_some())
    }

    /// Store freshly loaded geometry, replacing any stale morph array.
    pub fn insert_geometry(&mut self, id: &str, cloud: PointCloud) -> Rc<PointCloud> {
        let cloud = Rc::new(cloud);
        let asset = self.entry(id);
        asset.geometry = Some(cloud.clone());
        asset.morph = None;
        asset.in_flight = None;
        cloud
    }

    /// Drop every morph array; called whenever the slot layout is rebuilt.
    pub fn invalidate_morphs(&mut self) {
        for asset in self.entries.values_mut() {
            asset.morph = None;
        }
    }

    /// Morph array for `id` on the slots described by `fractions`, deriving
    /// and memoising it on first use. `None` while geometry is missing.
    pub fn morph_for(
        &mut self,
        id: &str,
        fractions: &[f64],
        transform: &SectionTransform,
    ) -> Option<&SlotSet> {
        let asset = self.entries.get_mut(id)?;
        let key = fraction_key(fractions);
        if asset.morph.as_ref().map_or(true, |m| m.key != key) {
            let geometry = asset.geometry.as_ref()?;
            let slots = resample_target_by_fractions(geometry, fractions)?.transform(transform);
            asset.morph = Some(MorphArray { key, slots });
        }
        asset.morph.as_ref().map(|m| &m.slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resample::compute_sample_fractions;
    use glam::Vec3;

    fn line(n: usize) -> PointCloud {
        PointCloud::new((0..n).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect(), None)
    }

    #[test]
    fn morph_is_rebuilt_for_new_slot_count() {
        let mut cache = AssetCache::default();
        cache.insert_geometry("b", line(10));
        let t = SectionTransform::default();
        let four = compute_sample_fractions(100, 4);
        assert_eq!(cache.morph_for("b", &four, &t).map(|s| s.len()), Some(4));
        let eight = compute_sample_fractions(100, 8);
        assert_eq!(cache.morph_for("b", &eight, &t).map(|s| s.len()), Some(8));
        cache.invalidate_morphs();
        assert!(cache.get("b").unwrap().morph.is_none());
        assert!(cache.is_loaded("b"));
    }

    #[test]
    fn morph_is_rebuilt_for_new_fractions_at_same_count() {
        let mut cache = AssetCache::default();
        cache.insert_geometry("b", line(10));
        let t = SectionTransform::default();
        let from_small = compute_sample_fractions(3, 3);
        let from_large = compute_sample_fractions(1000, 3);
        assert_ne!(fraction_key(&from_small), fraction_key(&from_large));
        let first = cache.morph_for("b", &from_small, &t).unwrap().positions.clone();
        let second = cache.morph_for("b", &from_large, &t).unwrap().positions.clone();
        assert_eq!(first.len(), second.len());
        assert_ne!(first, second);
        let stored = cache.get("b").unwrap().morph.as_ref().unwrap().key;
        assert_eq!(stored, fraction_key(&from_large));
    }

    #[test]
    fn missing_geometry_has_no_morph() {
        let mut cache = AssetCache::default();
        cache.entry("c");
        let f = compute_sample_fractions(10, 2);
        assert!(cache
            .morph_for("c", &f, &SectionTransform::default())
            .is_none());
    }
}
