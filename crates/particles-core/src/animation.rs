//! Per-frame update: model rotation (gesture-driven or autonomous), pinch
//! expansion and the exponential easing of every particle toward its target.

use crate::color::{rainbow_color, ColorMode};
use crate::constants::*;
use crate::gesture::{GestureInterpreter, InteractionMode};
use crate::params::Params;
use crate::particles::ParticleSystem;
use glam::{Quat, Vec3};

/// Radial push applied to every target for the current pinch.
#[inline]
pub fn expansion_force(pinch_factor: f32, sensitivity: f32) -> f32 {
    pinch_factor * EXPANSION_SCALE * sensitivity
}

/// Target `target` of particle `index` after spin, expansion and per-particle noise.
#[inline]
pub fn displaced_target(target: Vec3, index: usize, time_sec: f32, expansion: f32) -> Vec3 {
    let dist = target.length() + RADIAL_EPSILON;
    let noise = (index as f32 * EXPANSION_NOISE_FREQ + time_sec).sin() * EXPANSION_NOISE_AMPLITUDE;
    target + target / dist * expansion * (1.0 + noise)
}

/// Ease the model rotation for this frame and return the mode it ran in.
pub fn update_rotation(
    rotation: &mut Vec3,
    gestures: &mut GestureInterpreter,
    params: &Params,
) -> InteractionMode {
    let mode = gestures.mode();
    match mode {
        InteractionMode::HandActive => {
            let s = gestures.state();
            rotation.x += (s.target_rotation_x - rotation.x) * params.response_speed;
            rotation.y += (s.target_rotation_y - rotation.y) * params.response_speed;
        }
        InteractionMode::AutoRotate => {
            *rotation +=
                params.auto_rotation_axis() * params.auto_rot_speed * AUTO_ROTATION_TIMESTEP;
            gestures.resync_targets(*rotation);
        }
    }
    mode
}

/// Advance the whole system by one frame at `time_sec` seconds since start.
pub fn step(
    system: &mut ParticleSystem,
    gestures: &mut GestureInterpreter,
    params: &Params,
    time_sec: f32,
) -> InteractionMode {
    let mode = update_rotation(&mut system.rotation, gestures, params);
    let expansion = expansion_force(gestures.pinch_factor(), params.expansion_sensitivity);
    let spin = system
        .shape
        .spin_rate()
        .map(|rate| Quat::from_rotation_y(-rate * time_sec));
    let rainbow = params.color_mode == ColorMode::Rainbow;
    let response = params.response_speed;

    let set = &mut system.set;
    let particles = set
        .positions
        .chunks_exact_mut(3)
        .zip(set.targets.chunks_exact(3))
        .zip(set.colors.chunks_exact_mut(3));
    for (i, ((pos, target), rgb)) in particles.enumerate() {
        if rainbow {
            let c = rainbow_color(i, time_sec, params.gradient_speed, pos[1]);
            rgb.copy_from_slice(&c.to_array());
        }
        let mut target = Vec3::from_slice(target);
        if let Some(q) = spin {
            target = q * target;
        }
        let goal = displaced_target(target, i, time_sec, expansion);
        let current = Vec3::from_slice(pos);
        let next = current + (goal - current) * response;
        pos.copy_from_slice(&next.to_array());
    }
    if rainbow {
        system.colors_dirty = true;
    }
    mode
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_expansion_leaves_target_alone() {
        let t = Vec3::new(3.0, -4.0, 12.0);
        assert_eq!(displaced_target(t, 7, 1.3, 0.0), t);
    }

    #[test]
    fn expansion_pushes_outward() {
        let t = Vec3::new(0.0, 5.0, 0.0);
        let d = displaced_target(t, 0, 0.0, 10.0);
        // noise is sin(0) = 0 for index 0 at t = 0
        assert!((d.y - 15.0).abs() < 1e-2);
        assert_eq!(d.x, 0.0);
    }

    #[test]
    fn expansion_force_scales_linearly() {
        assert_eq!(expansion_force(0.0, 2.0), 0.0);
        assert_eq!(expansion_force(1.0, 2.0), 50.0);
        assert_eq!(expansion_force(0.5, 1.0), 12.5);
    }

    #[test]
    fn spin_matches_xz_rotation_formula() {
        // x' = x cos a - z sin a, z' = x sin a + z cos a
        let a = 0.7_f32;
        let p = Vec3::new(2.0, 1.0, -3.0);
        let q = Quat::from_rotation_y(-a) * p;
        assert!((q.x - (p.x * a.cos() - p.z * a.sin())).abs() < 1e-5);
        assert!((q.z - (p.x * a.sin() + p.z * a.cos())).abs() < 1e-5);
        assert!((q.y - p.y).abs() < 1e-6);
    }
}
