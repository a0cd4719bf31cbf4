//! Application context tying parameters, particles and gestures together.
//!
//! UI callbacks never touch particle buffers; they change `params` and queue an
//! [`Action`]. The frame loop drains the queue before stepping, so a rebuild
//! always lands between two frames and the renderer never sees buffers of
//! different lengths.

use crate::animation;
use crate::gesture::{GestureInterpreter, Hand, InteractionMode};
use crate::params::{ChangeEffect, Params};
use crate::particles::ParticleSystem;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Rebuild,
    Regenerate,
    Recolor,
    ResetModel,
    ResetGestures,
    ResetAutoRotation,
}

impl Action {
    pub fn for_effect(effect: ChangeEffect) -> Option<Action> {
        match effect {
            ChangeEffect::Immediate => None,
            ChangeEffect::Recolor => Some(Action::Recolor),
            ChangeEffect::Regenerate => Some(Action::Regenerate),
            ChangeEffect::Rebuild => Some(Action::Rebuild),
        }
    }

    /// Whether the action rewrites parameter values the panel is showing.
    pub fn changes_params(self) -> bool {
        matches!(
            self,
            Action::ResetModel | Action::ResetGestures | Action::ResetAutoRotation
        )
    }
}

/// Outcome of one frame, for the frontend to decide what to upload and show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    pub mode: InteractionMode,
    pub mode_changed: bool,
    pub colors_dirty: bool,
    pub params_changed: bool,
}

pub struct Visualizer {
    pub params: Params,
    particles: ParticleSystem,
    gestures: GestureInterpreter,
    pending: Vec<Action>,
    last_mode: Option<InteractionMode>,
}

impl Visualizer {
    pub fn new(params: Params, seed: u64) -> Self {
        let particles = ParticleSystem::new(&params, seed);
        Self {
            params,
            particles,
            gestures: GestureInterpreter::new(),
            pending: Vec::new(),
            last_mode: None,
        }
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn gestures(&self) -> &GestureInterpreter {
        &self.gestures
    }

    /// Queue follow-up work for a parameter change.
    pub fn apply_effect(&mut self, effect: ChangeEffect) {
        if let Some(action) = Action::for_effect(effect) {
            self.queue(action);
        }
    }

    pub fn queue(&mut self, action: Action) {
        if !self.pending.contains(&action) {
            self.pending.push(action);
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Run queued actions; returns whether any of them rewrote parameter values.
    pub fn apply_pending(&mut self) -> bool {
        let mut params_changed = false;
        let mut rebuild = false;
        let mut regenerate = false;
        let mut recolor = false;
        for action in std::mem::take(&mut self.pending) {
            params_changed |= action.changes_params();
            match action {
                Action::Rebuild => rebuild = true,
                Action::Regenerate => regenerate = true,
                Action::Recolor => recolor = true,
                Action::ResetModel => {
                    self.params.reset_model();
                    rebuild = true;
                }
                Action::ResetGestures => self.params.reset_gestures(),
                Action::ResetAutoRotation => {
                    self.params.reset_auto_rotation();
                    self.particles.set_rotation(Vec3::ZERO);
                    self.gestures.reset_targets();
                }
            }
        }
        // A rebuild regenerates and recolours as part of it.
        if rebuild {
            self.particles.rebuild(&self.params);
        } else if regenerate {
            self.particles.regenerate(&self.params);
        } else if recolor {
            self.particles.recolor(&self.params);
        }
        params_changed
    }

    /// Fold a tracking result for a fresh video frame into the interaction state.
    pub fn observe_hand(&mut self, hand: Option<&Hand>) {
        self.gestures.observe(hand, self.params.rotate_speed);
    }

    /// Drain queued actions and step the simulation at `time_sec` seconds since start.
    pub fn advance(&mut self, time_sec: f32) -> FrameReport {
        let params_changed = self.apply_pending();
        let mode = animation::step(
            &mut self.particles,
            &mut self.gestures,
            &self.params,
            time_sec,
        );
        let mode_changed = self.last_mode != Some(mode);
        self.last_mode = Some(mode);
        FrameReport {
            mode,
            mode_changed,
            colors_dirty: self.particles.take_colors_dirty(),
            params_changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamKey;
    use crate::shape::Shape;

    fn small() -> Params {
        let mut p = Params::default();
        p.set(ParamKey::ParticleCount, 5000.0);
        p
    }

    #[test]
    fn queue_deduplicates() {
        let mut v = Visualizer::new(small(), 3);
        v.queue(Action::Regenerate);
        v.queue(Action::Regenerate);
        assert_eq!(v.pending.len(), 1);
        assert!(!v.apply_pending());
        assert!(!v.has_pending());
    }

    #[test]
    fn count_change_is_applied_on_next_frame() {
        let mut v = Visualizer::new(small(), 4);
        let effect = v.params.set(ParamKey::ParticleCount, 6000.0);
        v.apply_effect(effect);
        assert_eq!(v.particles().len(), 5000);
        v.advance(0.0);
        assert_eq!(v.particles().len(), 6000);
    }

    #[test]
    fn reset_auto_rotation_zeroes_rotation() {
        let mut v = Visualizer::new(small(), 5);
        v.params.set(ParamKey::AutoRotX, 1.0);
        for i in 0..10 {
            v.advance(i as f32 / 60.0);
        }
        assert_ne!(v.particles().rotation(), Vec3::ZERO);
        v.queue(Action::ResetAutoRotation);
        assert!(v.apply_pending());
        assert_eq!(v.particles().rotation(), Vec3::ZERO);
        assert_eq!(v.params.auto_rot_x, 0.0);
        assert_eq!(v.gestures().state().target_rotation_x, 0.0);
    }

    #[test]
    fn first_frame_reports_mode_change() {
        let mut v = Visualizer::new(small(), 6);
        let first = v.advance(0.0);
        assert!(first.mode_changed);
        assert!(first.colors_dirty);
        let second = v.advance(0.016);
        assert!(!second.mode_changed);
        assert!(!second.colors_dirty);
    }

    #[test]
    fn shape_change_regenerates_without_rebuild() {
        let mut v = Visualizer::new(small(), 7);
        let effect = v.params.set_shape(Shape::Dna);
        v.apply_effect(effect);
        v.advance(0.0);
        assert_eq!(v.particles().shape(), Shape::Dna);
        assert_eq!(v.particles().generation(), 1);
    }
}
