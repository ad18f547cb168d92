// End-to-end behaviour of the section transition state machine.

use glam::Vec3;
use pointscroll_core::{
    compute_sample_fractions, fraction_key, resample_target_by_fractions, Crossfade, Direction,
    Director, InputKind, LoadError, Phase, PointCloud, RenderFrame, Show,
};
use std::f32::consts::PI;

const WHEEL: InputKind = InputKind::Wheel;

fn show(n: usize) -> Show {
    let sections = (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            format!(
                r#"{{"id":"s{i}","model":"m{i}.json","title":"Title {i}","camera":{{"path_t":{t}}}}}"#
            )
        })
        .collect::<Vec<_>>()
        .join(",");
    Show::from_json(&format!(
        r#"{{"timing":{{"ease":"linear","density":1.0}},"sections":[{sections}]}}"#
    ))
    .unwrap()
}

fn cloud(n: usize, y: f32) -> PointCloud {
    PointCloud::new(
        (0..n).map(|i| Vec3::new(i as f32 / n as f32, y, 0.0)).collect(),
        None,
    )
}

/// Director for `n` sections with section 0 (100 points) loaded and idle.
fn booted(n: usize) -> Director {
    let mut d = Director::new(show(n));
    assert_eq!(d.phase(), Phase::Boot);
    let reqs = d.take_load_requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].path, "m0.json");
    d.on_geometry_loaded(reqs[0].ticket, Ok(cloud(100, 0.0)));
    assert_eq!(d.phase(), Phase::Idle);
    d
}

/// Resolve every queued request successfully with a `points`-sized cloud.
fn resolve_all(d: &mut Director, points: usize) {
    for req in d.take_load_requests() {
        d.on_geometry_loaded(req.ticket, Ok(cloud(points, req.ticket.section as f32)));
    }
}

#[test]
fn idle_scroll_past_threshold_starts_fade_out() {
    let mut d = booted(3);
    d.on_scroll(100.0, WHEEL);
    assert_eq!(d.phase(), Phase::Idle);
    d.on_scroll(50.0, WHEEL);
    assert_eq!(d.phase(), Phase::FadeOut);
    assert!((d.progress() - 30.0 / 900.0).abs() < 1e-6);
    assert_eq!(d.direction(), Some(Direction::Forward));
    assert_eq!(d.transition_target(), Some(1));
    let reqs = d.take_load_requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].path, "m1.json");
}

#[test]
fn sign_flip_discards_idle_accumulation() {
    let mut d = booted(3);
    d.on_scroll(100.0, WHEEL);
    d.on_scroll(-100.0, WHEEL);
    assert_eq!(d.phase(), Phase::Idle);
    d.on_scroll(-30.0, WHEEL);
    assert_eq!(d.phase(), Phase::FadeOut);
    assert_eq!(d.direction(), Some(Direction::Backward));
    assert_eq!(d.transition_target(), Some(2));
}

#[test]
fn reversing_fade_out_to_zero_cancels_and_restores() {
    let mut d = booted(3);
    let rest = d.visual_state();
    d.on_scroll(480.0, WHEEL);
    assert!((d.progress() - 0.4).abs() < 1e-6);
    assert!(d.rotation() > 0.0);
    assert!(d.scatter() > 0.0);
    d.on_scroll(-450.0, WHEEL);
    assert_eq!(d.phase(), Phase::Idle);
    assert_eq!(d.current_section(), 0);
    assert_eq!(d.crossfade(), Crossfade::REST);
    assert!(!d.morph().has_target());
    assert!(d.visual_state().approx_eq(&rest, 1e-6));

    // The orphaned load still fills the cache but changes nothing on screen
    resolve_all(&mut d, 50);
    assert_eq!(d.phase(), Phase::Idle);
    assert!(d.assets().is_loaded("s1"));
    assert!(d.visual_state().approx_eq(&rest, 1e-6));
}

#[test]
fn zero_net_scroll_inside_fade_out_returns_to_same_visuals() {
    let mut d = booted(3);
    d.on_scroll(300.0, WHEEL);
    let before = d.visual_state();
    d.on_scroll(250.0, WHEEL);
    d.on_scroll(-100.0, WHEEL);
    d.on_scroll(-150.0, WHEEL);
    assert_eq!(d.phase(), Phase::FadeOut);
    assert!(d.visual_state().approx_eq(&before, 1e-4));
}

#[test]
fn zero_net_scroll_inside_fade_in_returns_to_same_visuals() {
    let mut d = booted(3);
    d.on_scroll(1020.0, WHEEL);
    assert_eq!(d.phase(), Phase::Loading);
    assert_eq!(d.pending_carry(), 0.0);
    resolve_all(&mut d, 60);
    assert_eq!(d.phase(), Phase::FadeIn);
    let entry = d.visual_state();

    d.on_scroll(90.0, WHEEL);
    let before = d.visual_state();
    d.on_scroll(-270.0, WHEEL);
    assert_eq!(d.phase(), Phase::FadeIn);
    assert!(d.progress() < 0.0);
    // Visuals hold at the start of the fade while progress is negative
    assert!(d.visual_state().approx_eq(&entry, 1e-5));
    d.on_scroll(270.0, WHEEL);
    assert_eq!(d.phase(), Phase::FadeIn);
    assert!((d.progress() - 0.1).abs() < 1e-5);
    assert!(d.visual_state().approx_eq(&before, 1e-4));
}

#[test]
fn carry_waits_through_loading_and_replays_after_fade_in() {
    let mut d = booted(3);
    d.on_scroll(1200.0, WHEEL);
    assert_eq!(d.phase(), Phase::Loading);
    assert!((d.pending_carry() - 0.2).abs() < 1e-5);
    assert!((d.rotation() - PI).abs() < 1e-5);
    assert!((d.scatter() - 1.0).abs() < 1e-6);
    assert_eq!(d.crossfade(), Crossfade::HELD);
    assert_eq!(d.morph().position_blend(), 0.0);

    resolve_all(&mut d, 60);
    assert_eq!(d.phase(), Phase::FadeIn);
    assert_eq!(d.progress(), 0.0);
    assert!((d.pending_carry() - 0.2).abs() < 1e-5, "carry is not applied on entry");
    assert_eq!(d.morph().position_blend(), 1.0);
    assert_eq!(d.current_section(), 0);

    d.on_scroll(900.0, WHEEL);
    assert_eq!(d.current_section(), 1);
    // 0.2 of leftover progress = 180 wheel units: 120 to trigger, 60 of progress
    assert_eq!(d.phase(), Phase::FadeOut);
    assert_eq!(d.transition_target(), Some(2));
    assert!((d.progress() - 60.0 / 900.0).abs() < 1e-4);
}

#[test]
fn carry_of_a_full_phase_completes_fade_in_immediately() {
    let mut d = booted(3);
    d.on_scroll(1200.0, WHEEL);
    d.on_scroll(900.0, WHEEL);
    assert_eq!(d.phase(), Phase::Loading);
    assert!((d.pending_carry() - 1.2).abs() < 1e-4);
    resolve_all(&mut d, 60);
    assert_eq!(d.current_section(), 1);
    assert_eq!(d.phase(), Phase::FadeOut);
    assert_eq!(d.transition_target(), Some(2));
}

#[test]
fn backward_scroll_while_loading_drains_carry_but_never_below_zero() {
    let mut d = booted(3);
    d.on_scroll(1200.0, WHEEL);
    d.on_scroll(-5000.0, WHEEL);
    assert_eq!(d.phase(), Phase::Loading);
    assert_eq!(d.pending_carry(), 0.0);
    assert_eq!(d.progress(), 1.0);
}

#[test]
fn stale_resolutions_only_fill_the_cache() {
    let mut d = booted(3);
    d.on_scroll(150.0, WHEEL);
    let to_one = d.take_load_requests();
    d.on_scroll(-200.0, WHEEL);
    assert_eq!(d.phase(), Phase::Idle);

    d.on_scroll(-150.0, WHEEL);
    assert_eq!(d.transition_target(), Some(2));
    let to_two = d.take_load_requests();
    assert_eq!(to_two.len(), 1);
    assert_ne!(to_one[0].ticket, to_two[0].ticket);

    // A late failure for the abandoned section must not abort this transition
    d.on_geometry_loaded(
        to_one[0].ticket,
        Err(LoadError::Fetch {
            path: "m1.json".into(),
            reason: "offline".into(),
        }),
    );
    assert_eq!(d.phase(), Phase::FadeOut);
    assert!(!d.is_target_ready());

    d.on_geometry_loaded(to_two[0].ticket, Ok(cloud(80, 2.0)));
    assert!(d.is_target_ready());
    assert!(d.morph().has_target());
}

#[test]
fn late_success_for_an_abandoned_section_leaves_the_morph_alone() {
    let mut d = booted(3);
    d.on_scroll(150.0, WHEEL);
    let to_one = d.take_load_requests();
    d.on_scroll(-200.0, WHEEL);
    assert_eq!(d.phase(), Phase::Idle);
    d.on_scroll(-150.0, WHEEL);
    assert_eq!(d.transition_target(), Some(2));
    let to_two = d.take_load_requests();
    let base = d.morph().base_positions().to_vec();
    let blend = d.morph().position_blend();

    d.on_geometry_loaded(to_one[0].ticket, Ok(cloud(80, 1.0)));
    assert_eq!(d.phase(), Phase::FadeOut);
    assert_eq!(d.transition_target(), Some(2));
    assert!(!d.is_target_ready());
    assert!(!d.morph().has_target());
    assert_eq!(d.morph().base_positions(), base.as_slice());
    assert_eq!(d.morph().position_blend(), blend);
    assert!(d.assets().is_loaded("s1"));

    d.on_geometry_loaded(to_two[0].ticket, Ok(cloud(80, 2.0)));
    assert!(d.is_target_ready());
}

#[test]
fn restarting_toward_the_same_section_reuses_the_in_flight_load() {
    let mut d = booted(3);
    d.on_scroll(150.0, WHEEL);
    let first = d.take_load_requests();
    d.on_scroll(-200.0, WHEEL);
    d.on_scroll(150.0, WHEEL);
    assert_eq!(d.transition_target(), Some(1));
    assert!(d.take_load_requests().is_empty());
    d.on_geometry_loaded(first[0].ticket, Ok(cloud(40, 1.0)));
    assert!(d.is_target_ready());
}

#[test]
fn huge_carry_is_replayed_without_recursion() {
    let mut d = booted(3);
    // Cache every section by starting and cancelling a transition to each
    d.on_scroll(150.0, WHEEL);
    resolve_all(&mut d, 60);
    d.on_scroll(-200.0, WHEEL);
    d.on_scroll(-150.0, WHEEL);
    resolve_all(&mut d, 70);
    d.on_scroll(200.0, WHEEL);
    assert_eq!(d.phase(), Phase::Idle);
    assert!(d.assets().is_loaded("s1") && d.assets().is_loaded("s2"));

    d.on_scroll(1.0e7, WHEEL);
    assert!(d.take_load_requests().is_empty());
    assert!(matches!(d.phase(), Phase::Idle | Phase::FadeOut | Phase::FadeIn));
    assert!(d.current_section() < 3);
    assert!(d.pending_carry() < 1.0);
    assert!(d.progress() < 1.0);
}

#[test]
fn load_failure_aborts_to_idle_and_drops_carry() {
    let mut d = booted(3);
    let rest = d.visual_state();
    d.on_scroll(1200.0, WHEEL);
    let reqs = d.take_load_requests();
    d.on_geometry_loaded(
        reqs[0].ticket,
        Err(LoadError::Parse {
            path: "m1.json".into(),
            reason: "bad json".into(),
        }),
    );
    assert_eq!(d.phase(), Phase::Idle);
    assert_eq!(d.current_section(), 0);
    assert_eq!(d.pending_carry(), 0.0);
    assert!(d.visual_state().approx_eq(&rest, 1e-6));

    // The next attempt fetches again
    d.on_scroll(150.0, WHEEL);
    assert_eq!(d.take_load_requests().len(), 1);
}

#[test]
fn empty_geometry_counts_as_a_failure() {
    let mut d = booted(2);
    d.on_scroll(1200.0, WHEEL);
    let reqs = d.take_load_requests();
    d.on_geometry_loaded(reqs[0].ticket, Ok(PointCloud::default()));
    assert_eq!(d.phase(), Phase::Idle);
}

#[test]
fn completed_transition_commits_cross_resampled_target() {
    let mut d = booted(3);
    d.on_scroll(150.0, WHEEL);
    let reqs = d.take_load_requests();
    let target = cloud(37, 1.0);
    d.on_geometry_loaded(reqs[0].ticket, Ok(target.clone()));
    assert_eq!(d.morph().len(), 100);

    d.set_density(0.5);
    assert_eq!(d.slot_count(), 50);
    assert_eq!(d.fractions().len(), 50);
    assert!(d.is_target_ready(), "cached target is re-derived for the new slot count");
    let morph = d.assets().get("s1").and_then(|a| a.morph.as_ref()).unwrap();
    assert_eq!(morph.slots.len(), 50);
    assert_eq!(morph.key, fraction_key(d.fractions()));

    d.on_scroll(900.0, WHEEL);
    assert_eq!(d.phase(), Phase::FadeIn);
    d.on_scroll(900.0, WHEEL);
    assert_eq!(d.phase(), Phase::Idle);
    assert_eq!(d.current_section(), 1);
    assert_eq!(d.morph().position_blend(), 0.0);
    assert!(d.rotation().abs() < 1e-4);
    assert_eq!(d.scatter(), 0.0);

    let expected = resample_target_by_fractions(&target, &compute_sample_fractions(100, 50))
        .unwrap()
        .positions;
    assert_eq!(d.morph().base_positions(), expected.as_slice());
}

#[test]
fn auto_advance_runs_on_the_clock() {
    let mut d = booted(3);
    d.on_section_advance_request(2, Direction::Forward);
    assert_eq!(d.phase(), Phase::FadeOut);
    d.tick(0.6);
    assert!((d.progress() - 0.5).abs() < 1e-5);
    resolve_all(&mut d, 70);
    for _ in 0..100 {
        if d.phase() == Phase::Idle {
            break;
        }
        d.tick(0.1);
    }
    assert_eq!(d.phase(), Phase::Idle);
    assert_eq!(d.current_section(), 2);
}

#[test]
fn manual_scroll_takes_over_auto_advance() {
    let mut d = booted(3);
    d.on_section_advance_request(1, Direction::Forward);
    d.tick(0.3);
    d.on_scroll(-2000.0, WHEEL);
    assert_eq!(d.phase(), Phase::Idle);
    d.tick(1.0);
    assert_eq!(d.phase(), Phase::Idle);
    assert_eq!(d.current_section(), 0);
}

#[test]
fn advance_requests_are_ignored_mid_transition() {
    let mut d = booted(3);
    d.on_scroll(150.0, WHEEL);
    d.on_section_advance_request(2, Direction::Forward);
    assert_eq!(d.transition_target(), Some(1));
}

#[test]
fn boot_failure_retries_on_next_scroll() {
    let mut d = Director::new(show(2));
    let reqs = d.take_load_requests();
    d.on_geometry_loaded(
        reqs[0].ticket,
        Err(LoadError::Fetch {
            path: "m0.json".into(),
            reason: "404".into(),
        }),
    );
    assert_eq!(d.phase(), Phase::Boot);
    assert!(d.take_load_requests().is_empty());
    d.on_scroll(10.0, WHEEL);
    let retry = d.take_load_requests();
    assert_eq!(retry.len(), 1);
    d.on_geometry_loaded(retry[0].ticket, Ok(cloud(10, 0.0)));
    assert_eq!(d.phase(), Phase::Idle);
}

#[test]
fn presentation_follows_the_crossfade() {
    let mut d = booted(2);
    let p = d.presentation().unwrap();
    assert_eq!(p.title, "Title 0");
    assert_eq!(p.text_opacity, 1.0);

    d.on_scroll(120.0 + 450.0, WHEEL);
    let p = d.presentation().unwrap();
    assert!((p.text_opacity - 0.5).abs() < 1e-5);
    assert_eq!(p.next, Some(1));

    d.on_scroll(450.0, WHEEL);
    resolve_all(&mut d, 30);
    assert_eq!(d.phase(), Phase::FadeIn);
    d.on_scroll(450.0, WHEEL);
    let p = d.presentation().unwrap();
    assert_eq!(p.title, "Title 1");
    assert!((p.text_opacity - 0.5).abs() < 1e-5);
}

#[test]
fn render_frame_exposes_slots_and_uniforms() {
    let d = booted(2);
    let mut frame = RenderFrame::default();
    d.render_frame(1.5, &mut frame);
    assert_eq!(frame.len(), 100);
    assert_eq!(frame.colors.len(), 100);
    assert_eq!(frame.uniforms.params[2], 0.0);
    assert_eq!(frame.uniforms.post[3], 1.5);
    assert!(frame.uniforms.post[2] > 0.0);
}

#[test]
fn invalid_highlight_keeps_previous_color() {
    let mut d = booted(2);
    let mut frame = RenderFrame::default();
    d.set_highlight("#ff0000");
    d.render_frame(1.0, &mut frame);
    assert_eq!(&frame.uniforms.highlight[..3], &[1.0f32, 0.0, 0.0]);
    d.set_highlight("not a colour");
    d.render_frame(1.0, &mut frame);
    assert_eq!(&frame.uniforms.highlight[..3], &[1.0f32, 0.0, 0.0]);
}
