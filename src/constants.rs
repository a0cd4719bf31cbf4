// Frontend tuning constants: page element ids, renderer look, and tracker setup.
// Simulation constants live in `particles_core::constants`.

// Page elements
pub const CANVAS_ID: &str = "app-canvas";
pub const STATUS_ID: &str = "status";
pub const LOADER_ID: &str = "loader";
pub const VIDEO_ID: &str = "video-input";
pub const FULLSCREEN_BUTTON_ID: &str = "fs-btn";
pub const PANEL_ID: &str = "settings-panel";

// Loader fade-out before removal (ms)
pub const LOADER_REMOVE_DELAY_MS: i32 = 500;

// Camera projection
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Particle material
pub const PARTICLE_OPACITY: f32 = 0.9;
pub const FOG_DENSITY: f32 = 0.02;
pub const FOG_COLOR: [f32; 3] = [2.0 / 255.0, 2.0 / 255.0, 2.0 / 255.0]; // #020202

// Hand tracker
pub const VISION_WASM_PATH: &str = "https://cdn.jsdelivr.net/npm/@mediapipe/tasks-vision@0.10.3/wasm";
pub const HAND_MODEL_PATH: &str =
    "https://storage.googleapis.com/mediapipe-models/hand_landmarker/hand_landmarker/float16/1/hand_landmarker.task";
pub const HAND_DELEGATE: &str = "GPU";
pub const HAND_RUNNING_MODE: &str = "VIDEO";
pub const MAX_HANDS: u32 = 1;
