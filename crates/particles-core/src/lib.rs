pub mod animation;
pub mod app;
pub mod color;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod orbit;
pub mod params;
pub mod particles;
pub mod shape;
pub mod state;
pub mod tracking;

pub use app::*;
pub use color::{ColorMode, Rgb};
pub use error::{CoreError, CoreResult};
pub use gesture::{GestureInterpreter, Hand, InteractionMode, InteractionState, Landmark};
pub use orbit::OrbitCamera;
pub use params::{ChangeEffect, ParamKey, Params, SliderSpec};
pub use particles::{ParticleSet, ParticleSystem};
pub use shape::Shape;
pub use state::Camera;
pub use tracking::{FrameGate, TrackerState};
