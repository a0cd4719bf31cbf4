//! Hand-landmark interpretation: hand translation drives rotation targets and
//! the thumb/index pinch drives a smoothed expansion factor.

use crate::constants::*;
use crate::error::{CoreError, CoreResult};
use glam::Vec3;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_TIP: usize = 8;
pub const PINKY_MCP: usize = 17;

/// Normalized image-space landmark as reported by the hand-tracking model.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    pub landmarks: [Landmark; LANDMARK_COUNT],
}

impl Hand {
    pub fn from_slice(landmarks: &[Landmark]) -> CoreResult<Self> {
        let landmarks: [Landmark; LANDMARK_COUNT] = landmarks
            .get(..LANDMARK_COUNT)
            .and_then(|s| s.try_into().ok())
            .ok_or(CoreError::MissingLandmarks {
                got: landmarks.len(),
                expected: LANDMARK_COUNT,
            })?;
        Ok(Self { landmarks })
    }

    /// Mean of the wrist and the index/pinky knuckles, in image space.
    pub fn center(&self) -> (f32, f32) {
        let pts = [
            self.landmarks[WRIST],
            self.landmarks[INDEX_MCP],
            self.landmarks[PINKY_MCP],
        ];
        let x = pts.iter().map(|p| p.x).sum::<f32>() / 3.0;
        let y = pts.iter().map(|p| p.y).sum::<f32>() / 3.0;
        (x, y)
    }

    /// Thumb-tip to index-tip distance in the image plane.
    pub fn pinch_distance(&self) -> f32 {
        let thumb = self.landmarks[THUMB_TIP];
        let index = self.landmarks[INDEX_TIP];
        ((thumb.x - index.x).powi(2) + (thumb.y - index.y).powi(2)).sqrt()
    }
}

/// Map a raw pinch distance onto [0, 1].
#[inline]
pub fn normalize_pinch(distance: f32) -> f32 {
    ((distance - PINCH_MIN_DISTANCE) * PINCH_GAIN).clamp(0.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionMode {
    HandActive,
    AutoRotate,
}

impl InteractionMode {
    pub fn status_text(self) -> &'static str {
        match self {
            InteractionMode::HandActive => "Interactive | move: rotate | pinch: expand",
            InteractionMode::AutoRotate => "Observing (no hand detected)",
        }
    }

    pub fn status_color(self) -> &'static str {
        match self {
            InteractionMode::HandActive => "#00ff88",
            InteractionMode::AutoRotate => "#00d2ff",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionState {
    pub hand_detected: bool,
    pub last_hand_x: f32,
    pub last_hand_y: f32,
    pub target_rotation_x: f32,
    pub target_rotation_y: f32,
    pub pinch_factor: f32,
}

/// Owns the interaction state and folds one tracking result per fresh video frame into it.
#[derive(Clone, Debug, Default)]
pub struct GestureInterpreter {
    state: InteractionState,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn mode(&self) -> InteractionMode {
        if self.state.hand_detected {
            InteractionMode::HandActive
        } else {
            InteractionMode::AutoRotate
        }
    }

    pub fn pinch_factor(&self) -> f32 {
        self.state.pinch_factor
    }

    /// Consume the result for a newly decoded video frame; `None` means no hand was found.
    pub fn observe(&mut self, hand: Option<&Hand>, rotate_speed: f32) {
        let s = &mut self.state;
        let Some(hand) = hand else {
            s.hand_detected = false;
            s.pinch_factor += (0.0 - s.pinch_factor) * PINCH_DECAY_RATE;
            return;
        };

        let (cx, cy) = hand.center();
        if s.hand_detected {
            s.target_rotation_y -= (cx - s.last_hand_x) * rotate_speed;
            s.target_rotation_x += (cy - s.last_hand_y) * rotate_speed;
        } else {
            s.hand_detected = true;
        }
        s.last_hand_x = cx;
        s.last_hand_y = cy;

        let pinch = normalize_pinch(hand.pinch_distance());
        s.pinch_factor += (pinch - s.pinch_factor) * PINCH_RISE_RATE;
    }

    /// Align rotation targets with the current model rotation so a returning hand does not snap.
    pub fn resync_targets(&mut self, rotation: Vec3) {
        self.state.target_rotation_x = rotation.x;
        self.state.target_rotation_y = rotation.y;
    }

    pub fn reset_targets(&mut self) {
        self.state.target_rotation_x = 0.0;
        self.state.target_rotation_y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_landmark_list_is_rejected() {
        let err = Hand::from_slice(&[Landmark::default(); 5]).unwrap_err();
        assert_eq!(
            err,
            CoreError::MissingLandmarks {
                got: 5,
                expected: LANDMARK_COUNT
            }
        );
    }

    #[test]
    fn extra_landmarks_are_ignored() {
        let hand = Hand::from_slice(&[Landmark::new(0.5, 0.5, 0.0); 25]).unwrap();
        assert_eq!(hand.landmarks.len(), LANDMARK_COUNT);
    }

    #[test]
    fn pinch_normalization_clamps() {
        assert_eq!(normalize_pinch(0.0), 0.0);
        assert_eq!(normalize_pinch(0.03), 0.0);
        assert!((normalize_pinch(0.13) - 0.5).abs() < 1e-6);
        assert_eq!(normalize_pinch(0.9), 1.0);
    }

    #[test]
    fn mode_follows_detection() {
        let mut g = GestureInterpreter::new();
        assert_eq!(g.mode(), InteractionMode::AutoRotate);
        let hand = Hand::from_slice(&[Landmark::new(0.4, 0.4, 0.0); LANDMARK_COUNT]).unwrap();
        g.observe(Some(&hand), 8.0);
        assert_eq!(g.mode(), InteractionMode::HandActive);
        g.observe(None, 8.0);
        assert_eq!(g.mode(), InteractionMode::AutoRotate);
    }
}
