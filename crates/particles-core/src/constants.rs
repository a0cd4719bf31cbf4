// Tuning constants shared by the simulation and the web frontend.

// Particle set
pub const INITIAL_SCATTER: f32 = 60.0; // edge of the cube fresh particles start in
pub const MIN_PARTICLE_COUNT: f32 = 5000.0;
pub const MAX_PARTICLE_COUNT: f32 = 50000.0;

// Heart rejection sampling
pub const HEART_ATTEMPTS_PER_POINT: usize = 64;

// Sphere ring population
pub const SPHERE_RADIUS: f32 = 9.0;
pub const RING_FRACTION_NUM: usize = 7; // ring starts at 7/10 of the set
pub const RING_FRACTION_DEN: usize = 10;
pub const RING_INNER_RADIUS: f32 = 12.0;
pub const RING_WIDTH: f32 = 8.0;
pub const RING_HEIGHT_JITTER: f32 = 0.5;
pub const RING_TILT: f32 = 0.4; // radians about X

// Target-field spin (radians per second about Y)
pub const DNA_SPIN_RATE: f32 = 0.6;
pub const GALAXY_SPIN_RATE: f32 = 0.2;

// Colour
pub const STATIC_COLOR_VARIANCE: f32 = 0.15; // full width, so ±0.075
pub const RAINBOW_INDEX_WEIGHT: f32 = 0.00002;
pub const RAINBOW_TIME_WEIGHT: f32 = 0.1;
pub const RAINBOW_HEIGHT_WEIGHT: f32 = 0.02;
pub const RAINBOW_SATURATION: f32 = 0.8;
pub const RAINBOW_LIGHTNESS: f32 = 0.6;

// Gesture
pub const PINCH_MIN_DISTANCE: f32 = 0.03;
pub const PINCH_GAIN: f32 = 5.0;
pub const PINCH_RISE_RATE: f32 = 0.1;
pub const PINCH_DECAY_RATE: f32 = 0.05;

// Animation
pub const AUTO_ROTATION_TIMESTEP: f32 = 0.005;
pub const EXPANSION_SCALE: f32 = 25.0;
pub const EXPANSION_NOISE_FREQ: f32 = 0.5;
pub const EXPANSION_NOISE_AMPLITUDE: f32 = 0.3;
pub const RADIAL_EPSILON: f32 = 0.001;

// Orbit camera
pub const CAMERA_DISTANCE: f32 = 25.0;
pub const CAMERA_MIN_DISTANCE: f32 = 5.0;
pub const CAMERA_MAX_DISTANCE: f32 = 120.0;
pub const ORBIT_DAMPING: f32 = 0.05;
