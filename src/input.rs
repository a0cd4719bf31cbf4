// Pure pointer and keyboard helpers, kept free of web APIs so they can be tested on the host.

/// Pointer drag bookkeeping for the orbit camera.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last_x: f32,
    pub last_y: f32,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, x: f32, y: f32) {
        *self = DragState {
            active: true,
            pointer_id,
            last_x: x,
            last_y: y,
        };
    }

    /// Movement since the previous event of the same pointer, if dragging.
    pub fn delta(&mut self, pointer_id: i32, x: f32, y: f32) -> Option<(f32, f32)> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let d = (x - self.last_x, y - self.last_y);
        self.last_x = x;
        self.last_y = y;
        Some(d)
    }

    pub fn end(&mut self, pointer_id: i32) {
        if pointer_id == self.pointer_id {
            self.active = false;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    ToggleFullscreen,
    TogglePanel,
    ToggleVideo,
    NextShape,
    PreviousShape,
}

#[inline]
pub fn key_command(key: &str) -> Option<KeyCommand> {
    match key {
        "f" | "F" => Some(KeyCommand::ToggleFullscreen),
        "h" | "H" => Some(KeyCommand::TogglePanel),
        "v" | "V" => Some(KeyCommand::ToggleVideo),
        "ArrowRight" | "]" => Some(KeyCommand::NextShape),
        "ArrowLeft" | "[" => Some(KeyCommand::PreviousShape),
        _ => None,
    }
}

/// Step `current` by `offset` through a list of `len` entries, wrapping at both ends.
#[inline]
pub fn cycle_index(current: usize, len: usize, offset: isize) -> usize {
    if len == 0 {
        return 0;
    }
    (current as isize + offset).rem_euclid(len as isize) as usize
}
