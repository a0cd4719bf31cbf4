//! Lifecycle of the external hand tracker and the guard that keeps detection
//! to one call per decoded video frame.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TrackerState {
    #[default]
    Uninitialized,
    Ready,
    Failed(String),
}

impl TrackerState {
    pub fn is_ready(&self) -> bool {
        matches!(self, TrackerState::Ready)
    }

    pub fn fail(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::error!("[tracking] hand tracking unavailable: {}", reason);
        *self = TrackerState::Failed(reason);
    }
}

/// Accepts a video timestamp only when it differs from the last accepted one.
#[derive(Clone, Debug, Default)]
pub struct FrameGate {
    last_video_time: Option<f64>,
}

impl FrameGate {
    pub fn accept(&mut self, video_time: f64) -> bool {
        if self.last_video_time == Some(video_time) {
            return false;
        }
        self.last_video_time = Some(video_time);
        true
    }
}
