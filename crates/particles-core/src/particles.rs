use crate::color::{assign_static, ColorMode};
use crate::constants::INITIAL_SCATTER;
use crate::params::Params;
use crate::shape::Shape;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Flat per-particle buffers, each `3 * len` long.
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
    pub(crate) positions: Vec<f32>,
    pub(crate) colors: Vec<f32>,
    pub(crate) targets: Vec<f32>,
}

impl ParticleSet {
    /// Fresh set scattered through a cube around the origin, all white, targets at the origin.
    pub fn scattered<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let positions = (0..count * 3)
            .map(|_| (rng.gen::<f32>() - 0.5) * INITIAL_SCATTER)
            .collect();
        Self {
            positions,
            colors: vec![1.0; count * 3],
            targets: vec![0.0; count * 3],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn targets(&self) -> &[f32] {
        &self.targets
    }

    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    pub fn target(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.targets[i * 3..i * 3 + 3])
    }

    pub fn color(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.colors[i * 3..i * 3 + 3])
    }
}

/// Owns the particle buffers, the active shape, the model rotation and the RNG
/// every generator draws from.
pub struct ParticleSystem {
    pub(crate) set: ParticleSet,
    pub(crate) shape: Shape,
    pub(crate) rotation: Vec3,
    rng: StdRng,
    generation: u64,
    pub(crate) colors_dirty: bool,
}

impl ParticleSystem {
    pub fn new(params: &Params, seed: u64) -> Self {
        let mut system = Self {
            set: ParticleSet::default(),
            shape: params.shape,
            rotation: Vec3::ZERO,
            rng: StdRng::seed_from_u64(seed),
            generation: 0,
            colors_dirty: false,
        };
        system.rebuild(params);
        system
    }

    pub fn set(&self) -> &ParticleSet {
        &self.set
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    /// Bumped on every rebuild so consumers know to reallocate their copies.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Replace the whole set with `params.particle_count` fresh particles.
    pub fn rebuild(&mut self, params: &Params) {
        let mut set = ParticleSet::scattered(params.particle_count, &mut self.rng);
        self.shape = params.shape;
        self.shape.generate_into(&mut set.targets, &mut self.rng);
        if params.color_mode == ColorMode::Custom {
            assign_static(&mut set.colors, params.color, &mut self.rng);
        }
        self.set = set;
        self.generation += 1;
        self.colors_dirty = true;
        log::info!(
            "[particles] rebuilt {} particles as {} (generation {})",
            self.set.len(),
            self.shape,
            self.generation
        );
    }

    /// Switch to `params.shape`, keeping current positions so particles ease over.
    pub fn regenerate(&mut self, params: &Params) {
        self.shape = params.shape;
        self.shape.generate_into(&mut self.set.targets, &mut self.rng);
        self.recolor(params);
    }

    /// Reassign static colours; a no-op in rainbow mode.
    pub fn recolor(&mut self, params: &Params) {
        if params.color_mode == ColorMode::Custom {
            assign_static(&mut self.set.colors, params.color, &mut self.rng);
            self.colors_dirty = true;
        }
    }

    /// Whether colours changed since the last call.
    pub fn take_colors_dirty(&mut self) -> bool {
        std::mem::take(&mut self.colors_dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamKey;

    #[test]
    fn scattered_set_is_inside_cube() {
        let set = ParticleSet::scattered(100, &mut StdRng::seed_from_u64(0));
        assert_eq!(set.len(), 100);
        assert!(set.positions().iter().all(|v| v.abs() <= 30.0));
        assert!(set.colors().iter().all(|&c| c == 1.0));
    }

    #[test]
    fn rebuild_bumps_generation_and_marks_colours() {
        let mut params = Params::default();
        params.set(ParamKey::ParticleCount, 5000.0);
        let mut system = ParticleSystem::new(&params, 1);
        assert_eq!(system.generation(), 1);
        assert!(system.take_colors_dirty());
        assert!(!system.take_colors_dirty());
        system.rebuild(&params);
        assert_eq!(system.generation(), 2);
    }

    #[test]
    fn regenerate_keeps_positions() {
        let mut params = Params::default();
        params.set(ParamKey::ParticleCount, 5000.0);
        let mut system = ParticleSystem::new(&params, 2);
        let before = system.set().positions().to_vec();
        params.set_shape(Shape::Galaxy);
        system.regenerate(&params);
        assert_eq!(system.shape(), Shape::Galaxy);
        assert_eq!(system.set().positions(), &before[..]);
        assert_eq!(system.generation(), 1);
    }
}
