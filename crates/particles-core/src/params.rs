//! Live-tunable parameters and the effect each change has on the particle system.

use crate::color::{ColorMode, Rgb};
use crate::constants::{MAX_PARTICLE_COUNT, MIN_PARTICLE_COUNT};
use crate::error::{CoreError, CoreResult};
use crate::shape::Shape;
use std::str::FromStr;

pub const DEFAULT_PARTICLE_COUNT: usize = 25_000;
pub const DEFAULT_PARTICLE_SIZE: f32 = 0.12;
pub const DEFAULT_COLOR: Rgb = Rgb::new(230.0 / 255.0, 0.0, 66.0 / 255.0); // #e60042
pub const DEFAULT_GRADIENT_SPEED: f32 = 1.2;
pub const DEFAULT_EXPANSION_SENSITIVITY: f32 = 2.0;
pub const DEFAULT_ROTATE_SPEED: f32 = 8.0;
pub const DEFAULT_RESPONSE_SPEED: f32 = 0.1;
pub const DEFAULT_AUTO_ROT_SPEED: f32 = 0.5;
pub const DEFAULT_AUTO_ROT_AXIS: [f32; 3] = [0.0, 1.0, 0.0];

/// What the particle system has to do after a parameter changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeEffect {
    /// Read directly every frame (or by the renderer); nothing to recompute.
    Immediate,
    /// Static colours must be reassigned.
    Recolor,
    /// Targets must be regenerated for the current shape.
    Regenerate,
    /// The whole particle set must be reallocated.
    Rebuild,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    ParticleCount,
    ParticleSize,
    GradientSpeed,
    ExpansionSensitivity,
    RotateSpeed,
    ResponseSpeed,
    AutoRotSpeed,
    AutoRotX,
    AutoRotY,
    AutoRotZ,
}

/// Range and label a slider for this parameter is built from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderSpec {
    pub label: &'static str,
    pub min: f32,
    pub max: f32,
    pub step: Option<f32>,
}

impl ParamKey {
    pub const ALL: [ParamKey; 10] = [
        ParamKey::ParticleCount,
        ParamKey::ParticleSize,
        ParamKey::GradientSpeed,
        ParamKey::ExpansionSensitivity,
        ParamKey::RotateSpeed,
        ParamKey::ResponseSpeed,
        ParamKey::AutoRotSpeed,
        ParamKey::AutoRotX,
        ParamKey::AutoRotY,
        ParamKey::AutoRotZ,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamKey::ParticleCount => "particleCount",
            ParamKey::ParticleSize => "particleSize",
            ParamKey::GradientSpeed => "gradientSpeed",
            ParamKey::ExpansionSensitivity => "expansionSensitivity",
            ParamKey::RotateSpeed => "rotateSpeed",
            ParamKey::ResponseSpeed => "responseSpeed",
            ParamKey::AutoRotSpeed => "autoRotSpeed",
            ParamKey::AutoRotX => "autoRotX",
            ParamKey::AutoRotY => "autoRotY",
            ParamKey::AutoRotZ => "autoRotZ",
        }
    }

    pub fn spec(self) -> SliderSpec {
        let (label, min, max, step) = match self {
            ParamKey::ParticleCount => (
                "Particle count",
                MIN_PARTICLE_COUNT,
                MAX_PARTICLE_COUNT,
                Some(1000.0),
            ),
            ParamKey::ParticleSize => ("Particle size", 0.01, 0.5, None),
            ParamKey::GradientSpeed => ("Flow speed", 0.1, 5.0, None),
            ParamKey::ExpansionSensitivity => ("Expansion force", 0.1, 5.0, None),
            ParamKey::RotateSpeed => ("Rotation force", 1.0, 20.0, None),
            ParamKey::ResponseSpeed => ("Smoothing", 0.01, 0.3, None),
            ParamKey::AutoRotSpeed => ("Auto speed", 0.0, 5.0, None),
            ParamKey::AutoRotX => ("X axis", -1.0, 1.0, None),
            ParamKey::AutoRotY => ("Y axis", -1.0, 1.0, None),
            ParamKey::AutoRotZ => ("Z axis", -1.0, 1.0, None),
        };
        SliderSpec {
            label,
            min,
            max,
            step,
        }
    }

    pub fn effect(self) -> ChangeEffect {
        match self {
            ParamKey::ParticleCount => ChangeEffect::Rebuild,
            _ => ChangeEffect::Immediate,
        }
    }
}

impl FromStr for ParamKey {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        ParamKey::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| CoreError::UnknownParam(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Params {
    pub particle_count: usize,
    pub particle_size: f32,
    pub shape: Shape,
    pub color_mode: ColorMode,
    pub color: Rgb,
    pub gradient_speed: f32,
    pub expansion_sensitivity: f32,
    pub rotate_speed: f32,
    pub response_speed: f32,
    pub auto_rot_speed: f32,
    pub auto_rot_x: f32,
    pub auto_rot_y: f32,
    pub auto_rot_z: f32,
    pub show_video: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            particle_size: DEFAULT_PARTICLE_SIZE,
            shape: Shape::default(),
            color_mode: ColorMode::default(),
            color: DEFAULT_COLOR,
            gradient_speed: DEFAULT_GRADIENT_SPEED,
            expansion_sensitivity: DEFAULT_EXPANSION_SENSITIVITY,
            rotate_speed: DEFAULT_ROTATE_SPEED,
            response_speed: DEFAULT_RESPONSE_SPEED,
            auto_rot_speed: DEFAULT_AUTO_ROT_SPEED,
            auto_rot_x: DEFAULT_AUTO_ROT_AXIS[0],
            auto_rot_y: DEFAULT_AUTO_ROT_AXIS[1],
            auto_rot_z: DEFAULT_AUTO_ROT_AXIS[2],
            show_video: false,
        }
    }
}

impl Params {
    pub fn get(&self, key: ParamKey) -> f32 {
        match key {
            ParamKey::ParticleCount => self.particle_count as f32,
            ParamKey::ParticleSize => self.particle_size,
            ParamKey::GradientSpeed => self.gradient_speed,
            ParamKey::ExpansionSensitivity => self.expansion_sensitivity,
            ParamKey::RotateSpeed => self.rotate_speed,
            ParamKey::ResponseSpeed => self.response_speed,
            ParamKey::AutoRotSpeed => self.auto_rot_speed,
            ParamKey::AutoRotX => self.auto_rot_x,
            ParamKey::AutoRotY => self.auto_rot_y,
            ParamKey::AutoRotZ => self.auto_rot_z,
        }
    }

    /// Store `value` clamped to the slider range. Non-finite input leaves the value untouched.
    pub fn set(&mut self, key: ParamKey, value: f32) -> ChangeEffect {
        if !value.is_finite() {
            log::warn!("[params] ignoring non-finite {} = {}", key.name(), value);
            return ChangeEffect::Immediate;
        }
        let spec = key.spec();
        let value = value.clamp(spec.min, spec.max);
        match key {
            ParamKey::ParticleCount => self.particle_count = value.round() as usize,
            ParamKey::ParticleSize => self.particle_size = value,
            ParamKey::GradientSpeed => self.gradient_speed = value,
            ParamKey::ExpansionSensitivity => self.expansion_sensitivity = value,
            ParamKey::RotateSpeed => self.rotate_speed = value,
            ParamKey::ResponseSpeed => self.response_speed = value,
            ParamKey::AutoRotSpeed => self.auto_rot_speed = value,
            ParamKey::AutoRotX => self.auto_rot_x = value,
            ParamKey::AutoRotY => self.auto_rot_y = value,
            ParamKey::AutoRotZ => self.auto_rot_z = value,
        }
        key.effect()
    }

    pub fn set_shape(&mut self, shape: Shape) -> ChangeEffect {
        self.shape = shape;
        ChangeEffect::Regenerate
    }

    pub fn set_color_mode(&mut self, mode: ColorMode) -> ChangeEffect {
        self.color_mode = mode;
        self.static_recolor()
    }

    pub fn set_color(&mut self, color: Rgb) -> ChangeEffect {
        self.color = color;
        self.static_recolor()
    }

    pub fn set_show_video(&mut self, show: bool) -> ChangeEffect {
        self.show_video = show;
        ChangeEffect::Immediate
    }

    fn static_recolor(&self) -> ChangeEffect {
        match self.color_mode {
            ColorMode::Custom => ChangeEffect::Recolor,
            ColorMode::Rainbow => ChangeEffect::Immediate,
        }
    }

    /// Restore count and size only; shape and colour choices are kept.
    pub fn reset_model(&mut self) {
        self.particle_count = DEFAULT_PARTICLE_COUNT;
        self.particle_size = DEFAULT_PARTICLE_SIZE;
    }

    pub fn reset_gestures(&mut self) {
        self.rotate_speed = DEFAULT_ROTATE_SPEED;
        self.expansion_sensitivity = DEFAULT_EXPANSION_SENSITIVITY;
        self.response_speed = DEFAULT_RESPONSE_SPEED;
    }

    pub fn reset_auto_rotation(&mut self) {
        self.auto_rot_speed = DEFAULT_AUTO_ROT_SPEED;
        [self.auto_rot_x, self.auto_rot_y, self.auto_rot_z] = DEFAULT_AUTO_ROT_AXIS;
    }

    pub fn auto_rotation_axis(&self) -> glam::Vec3 {
        glam::Vec3::new(self.auto_rot_x, self.auto_rot_y, self.auto_rot_z)
    }
}
