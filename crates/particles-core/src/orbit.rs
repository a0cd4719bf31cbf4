//! Damped orbit camera around the origin, driven by pointer drag and wheel.

use crate::constants::*;
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, TAU};

const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;
const ZOOM_STEP: f32 = 0.95;

#[derive(Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    distance: f32,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(CAMERA_DISTANCE)
    }
}

impl OrbitCamera {
    pub fn new(distance: f32) -> Self {
        let distance = distance.clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance,
            target_yaw: 0.0,
            target_pitch: 0.0,
            target_distance: distance,
        }
    }

    /// Drag by `dx`, `dy` pixels on a viewport `viewport_height` pixels tall.
    /// A drag across the full height turns the camera one revolution.
    pub fn drag(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.target_yaw -= TAU * dx / h;
        self.target_pitch = (self.target_pitch + TAU * dy / h).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Positive `delta` (wheel down) moves the camera away.
    pub fn zoom(&mut self, delta: f32) {
        let factor = if delta > 0.0 {
            1.0 / ZOOM_STEP
        } else if delta < 0.0 {
            ZOOM_STEP
        } else {
            1.0
        };
        self.target_distance =
            (self.target_distance * factor).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    /// Ease toward the drag/zoom targets; call once per frame.
    pub fn update(&mut self) {
        self.yaw += (self.target_yaw - self.yaw) * ORBIT_DAMPING;
        self.pitch += (self.target_pitch - self.pitch) * ORBIT_DAMPING;
        self.distance += (self.target_distance - self.distance) * ORBIT_DAMPING;
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_eye_looks_down_negative_z() {
        let cam = OrbitCamera::default();
        let eye = cam.eye();
        assert!((eye - Vec3::new(0.0, 0.0, CAMERA_DISTANCE)).length() < 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.drag(0.0, 1e6, 100.0);
        for _ in 0..2000 {
            cam.update();
        }
        let eye = cam.eye();
        assert!(eye.y < CAMERA_DISTANCE);
        assert!(eye.y > 0.0);
    }

    #[test]
    fn zoom_respects_limits_and_eases() {
        let mut cam = OrbitCamera::default();
        for _ in 0..200 {
            cam.zoom(1.0);
        }
        cam.update();
        assert!(cam.distance() > CAMERA_DISTANCE);
        assert!(cam.distance() < CAMERA_MAX_DISTANCE);
        for _ in 0..2000 {
            cam.update();
        }
        assert!((cam.distance() - CAMERA_MAX_DISTANCE).abs() < 1e-2);
    }
}
