// Host-side tests for frontend constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn projection_constants_are_sane() {
    assert!(CAMERA_FOV_DEG > 0.0 && CAMERA_FOV_DEG < 180.0);
    assert!(CAMERA_NEAR > 0.0);
    assert!(CAMERA_FAR > CAMERA_NEAR);
    assert!(MAX_PIXEL_RATIO >= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn material_constants_are_in_range() {
    assert!(PARTICLE_OPACITY > 0.0 && PARTICLE_OPACITY <= 1.0);
    assert!(FOG_DENSITY > 0.0);
    assert!(FOG_COLOR.iter().all(|c| (0.0..=1.0).contains(c)));
}

#[test]
fn element_ids_are_distinct() {
    let ids = [
        CANVAS_ID,
        STATUS_ID,
        LOADER_ID,
        VIDEO_ID,
        FULLSCREEN_BUTTON_ID,
        PANEL_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn tracker_runs_on_video_for_one_hand() {
    assert_eq!(HAND_RUNNING_MODE, "VIDEO");
    assert_eq!(MAX_HANDS, 1);
    assert!(HAND_MODEL_PATH.ends_with(".task"));
    assert!(VISION_WASM_PATH.contains("tasks-vision"));
}
