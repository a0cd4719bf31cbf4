// Integration tests for gesture interpretation.

use particles_core::gesture::{INDEX_MCP, INDEX_TIP, PINKY_MCP, THUMB_TIP, WRIST};
use particles_core::{GestureInterpreter, Hand, InteractionMode, Landmark};

/// A hand centred at (cx, cy) whose thumb and index tips are `pinch` apart.
fn hand_at(cx: f32, cy: f32, pinch: f32) -> Hand {
    let mut lms = [Landmark::new(cx, cy, 0.0); 21];
    lms[WRIST] = Landmark::new(cx, cy + 0.1, 0.0);
    lms[INDEX_MCP] = Landmark::new(cx - 0.05, cy - 0.05, 0.0);
    lms[PINKY_MCP] = Landmark::new(cx + 0.05, cy - 0.05, 0.0);
    lms[THUMB_TIP] = Landmark::new(cx, cy, 0.0);
    lms[INDEX_TIP] = Landmark::new(cx + pinch, cy, 0.0);
    Hand::from_slice(&lms).unwrap()
}

#[test]
fn center_is_mean_of_wrist_and_knuckles() {
    let (x, y) = hand_at(0.5, 0.4, 0.0).center();
    assert!((x - 0.5).abs() < 1e-6);
    assert!((y - 0.4).abs() < 1e-6);
}

#[test]
fn first_detection_does_not_rotate() {
    let mut g = GestureInterpreter::new();
    g.observe(Some(&hand_at(0.9, 0.1, 0.0)), 8.0);
    assert_eq!(g.state().target_rotation_x, 0.0);
    assert_eq!(g.state().target_rotation_y, 0.0);
    assert!((g.state().last_hand_x - 0.9).abs() < 1e-6);
}

#[test]
fn hand_motion_accumulates_rotation_targets() {
    let mut g = GestureInterpreter::new();
    g.observe(Some(&hand_at(0.5, 0.5, 0.0)), 10.0);
    g.observe(Some(&hand_at(0.6, 0.45, 0.0)), 10.0);
    // x delta drives Y (inverted), y delta drives X
    assert!((g.state().target_rotation_y - (-1.0)).abs() < 1e-4);
    assert!((g.state().target_rotation_x - (-0.5)).abs() < 1e-4);
    g.observe(Some(&hand_at(0.6, 0.55, 0.0)), 10.0);
    assert!((g.state().target_rotation_x - 0.5).abs() < 1e-4);
}

#[test]
fn losing_the_hand_restarts_the_reference_point() {
    let mut g = GestureInterpreter::new();
    g.observe(Some(&hand_at(0.2, 0.2, 0.0)), 8.0);
    g.observe(None, 8.0);
    assert_eq!(g.mode(), InteractionMode::AutoRotate);
    g.observe(Some(&hand_at(0.8, 0.8, 0.0)), 8.0);
    assert_eq!(g.state().target_rotation_y, 0.0);
    assert_eq!(g.mode(), InteractionMode::HandActive);
}

#[test]
fn pinch_converges_monotonically_toward_input() {
    let mut g = GestureInterpreter::new();
    // distance 0.13 normalizes to 0.5
    let hand = hand_at(0.5, 0.5, 0.13);
    let target = 0.5;
    let mut prev = g.pinch_factor();
    assert_eq!(prev, 0.0);
    for k in 1..=60 {
        g.observe(Some(&hand), 8.0);
        let now = g.pinch_factor();
        assert!(now > prev, "frame {k}: {now} <= {prev}");
        assert!(now <= target + 1e-5);
        let expected = target * (1.0 - 0.9_f32.powi(k));
        assert!((now - expected).abs() < 1e-3, "frame {k}: {now} vs {expected}");
        prev = now;
    }
    assert!((g.pinch_factor() - target).abs() < 1e-3);
}

#[test]
fn pinch_decays_once_hand_is_lost() {
    let mut g = GestureInterpreter::new();
    let hand = hand_at(0.5, 0.5, 0.5);
    for _ in 0..100 {
        g.observe(Some(&hand), 8.0);
    }
    let start = g.pinch_factor();
    assert!(start > 0.99);
    let mut prev = start;
    let mut frames = 0;
    while g.pinch_factor() > 0.01 {
        g.observe(None, 8.0);
        assert!(g.pinch_factor() < prev);
        prev = g.pinch_factor();
        frames += 1;
        assert!(frames <= 100, "pinch did not decay in time");
    }
    // 0.95^90 < 0.01
    assert!(frames <= 90);
}

#[test]
fn resync_copies_current_rotation() {
    let mut g = GestureInterpreter::new();
    g.resync_targets(glam::Vec3::new(0.3, -1.2, 9.0));
    assert_eq!(g.state().target_rotation_x, 0.3);
    assert_eq!(g.state().target_rotation_y, -1.2);
    g.reset_targets();
    assert_eq!(g.state().target_rotation_y, 0.0);
}
