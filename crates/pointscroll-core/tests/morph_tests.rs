use glam::Vec3;
use pointscroll_core::{MorphBuffer, SlotSet};

fn slots(xs: &[f32], color: Option<Vec3>) -> SlotSet {
    SlotSet {
        positions: xs.iter().map(|&x| Vec3::new(x, 0.0, 0.0)).collect(),
        colors: color.map(|c| vec![c; xs.len()]),
    }
}

#[test]
fn commit_promotes_target_and_resets_blend() {
    let mut m = MorphBuffer::default();
    m.reset(slots(&[0.0, 1.0, 2.0], Some(Vec3::X)), Vec3::ONE);
    let target = [Vec3::Y, Vec3::Y * 2.0, Vec3::Y * 3.0];
    assert!(m.set_morph_target(&target, Some(&[Vec3::Z; 3])));
    m.set_blend(0.25);
    m.commit();
    assert_eq!(m.base_positions(), &target);
    // Colours keep what was on screen at commit time
    let expected = Vec3::X.lerp(Vec3::Z, 0.25);
    assert!(m.base_colors().iter().all(|c| (*c - expected).length() < 1e-6));
    assert_eq!(m.position_blend(), 0.0);
    assert_eq!(m.color_blend(), 0.0);
    assert!(!m.has_target());
    assert_eq!(m.blended_position(2), Vec3::Y * 3.0);
}

#[test]
fn mismatched_target_length_is_ignored() {
    let mut m = MorphBuffer::default();
    m.reset(slots(&[0.0, 1.0], None), Vec3::ONE);
    assert!(!m.set_morph_target(&[Vec3::Y; 3], None));
    assert!(!m.has_target());
    m.set_blend(1.0);
    assert_eq!(m.blended_position(1), Vec3::X);
    assert_eq!(m.len(), 2);
}

#[test]
fn missing_colors_fall_back() {
    let mut m = MorphBuffer::default();
    m.reset(slots(&[0.0, 1.0], None), Vec3::new(0.5, 0.5, 0.5));
    assert!(m.base_colors().iter().all(|c| *c == Vec3::splat(0.5)));
    assert!(m.set_morph_target(&[Vec3::Y; 2], None));
    m.set_blend(1.0);
    assert_eq!(m.blended_color(0), Vec3::splat(0.5));
}

#[test]
fn blended_buffers_follow_blend_factor() {
    let mut m = MorphBuffer::default();
    m.reset(slots(&[0.0, 2.0], Some(Vec3::ZERO)), Vec3::ONE);
    assert!(m.set_morph_target(&[Vec3::X * 2.0, Vec3::X * 4.0], Some(&[Vec3::ONE; 2])));
    m.set_blend(0.5);
    let (mut p, mut c) = (Vec::new(), Vec::new());
    m.write_blended(&mut p, &mut c);
    assert_eq!(p, vec![Vec3::X, Vec3::X * 3.0]);
    assert_eq!(c, vec![Vec3::splat(0.5); 2]);
}
