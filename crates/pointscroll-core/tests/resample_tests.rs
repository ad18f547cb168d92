// Slot mapping properties shared by every morph.

use glam::Vec3;
use pointscroll_core::{
    compute_sample_fractions, keep_count_for, resample_positions_and_colors,
    resample_target_by_fractions, PointCloud,
};

fn ramp(n: usize) -> PointCloud {
    let positions = (0..n).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
    let colors = (0..n).map(|i| Vec3::splat(i as f32 / n as f32)).collect();
    PointCloud::new(positions, Some(colors))
}

const SIZES: [(usize, usize); 8] = [
    (2, 1),
    (2, 2),
    (10, 3),
    (10, 10),
    (37, 12),
    (100, 99),
    (1000, 7),
    (5, 9),
];

#[test]
fn fractions_have_keep_length_and_stay_in_unit_range() {
    for (s, k) in SIZES {
        let f = compute_sample_fractions(s, k);
        assert_eq!(f.len(), k, "s={s} k={k}");
        assert!(f.iter().all(|v| (0.0..=1.0).contains(v)), "s={s} k={k}");
    }
}

#[test]
fn fractions_are_non_decreasing_and_end_at_one() {
    for (s, k) in SIZES {
        let f = compute_sample_fractions(s, k);
        assert!(f.windows(2).all(|w| w[0] <= w[1]), "s={s} k={k}: {f:?}");
        assert_eq!(*f.last().unwrap(), 1.0, "s={s} k={k}");
    }
}

#[test]
fn fractions_at_full_density_are_identity() {
    let f = compute_sample_fractions(6, 6);
    assert_eq!(f, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    let cloud = ramp(6);
    let slots = resample_target_by_fractions(&cloud, &f).unwrap();
    assert_eq!(slots.positions, cloud.positions);
    assert_eq!(slots.colors, cloud.colors);
}

#[test]
fn cross_resampling_a_cloud_onto_its_own_slots_is_idempotent() {
    for (s, k) in SIZES {
        let cloud = ramp(s);
        let direct = resample_positions_and_colors(&cloud, k).unwrap();
        let f = compute_sample_fractions(s, k);
        let crossed = resample_target_by_fractions(&cloud, &f).unwrap();
        assert_eq!(direct.positions, crossed.positions, "s={s} k={k}");
        assert_eq!(direct.colors, crossed.colors, "s={s} k={k}");
    }
}

#[test]
fn targets_of_any_size_fill_every_slot() {
    let f = compute_sample_fractions(100, 25);
    for n in [1, 2, 13, 400] {
        let slots = resample_target_by_fractions(&ramp(n), &f).unwrap();
        assert_eq!(slots.len(), 25);
        assert_eq!(slots.positions[0].x, 0.0);
        assert_eq!(slots.positions[24].x, (n - 1) as f32);
    }
}

#[test]
fn keep_count_honours_ratio_and_cap() {
    assert_eq!(keep_count_for(1000, 1.0, 200_000), 1000);
    assert_eq!(keep_count_for(1000, 0.9995, 200_000), 1000);
    assert_eq!(keep_count_for(1000, 0.5, 200_000), 500);
    assert_eq!(keep_count_for(1000, 0.5, 300), 300);
    assert_eq!(keep_count_for(3, 0.0, 200_000), 1);
    assert_eq!(keep_count_for(0, 0.5, 200_000), 0);
}
