// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn input_limits_are_sane() {
    assert!(WHEEL_LINE_PX > 0.0);
    assert!(WHEEL_PAGE_FALLBACK_PX > WHEEL_LINE_PX);
    assert!(MAX_WHEEL_EVENT_PX > 0.0);
    assert!(MAX_TOUCH_EVENT_PX > 0.0);
    assert!(MAX_FRAME_DT_SEC > 0.0 && MAX_FRAME_DT_SEC < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn density_range_is_ordered() {
    assert!(DENSITY_STEP > 1.0);
    assert!(DENSITY_UI_MIN > 0.0 && DENSITY_UI_MIN < DENSITY_UI_MAX);
    assert!(DENSITY_UI_MAX <= 1.0);
}

#[test]
fn element_ids_are_distinct() {
    let ids = [
        CANVAS_ID,
        BACKDROP_ID,
        TEXT_ID,
        TITLE_ID,
        BODY_ID,
        PROGRESS_ID,
        OVERLAY_ID,
        OVERLAY_MESSAGE_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
