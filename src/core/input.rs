//! Per-tick input intents, decoupled from any input device.

/// Everything the session needs from the player for one tick.
///
/// `forward` and `strafe` are -1, 0 or 1. `restart` and `quit` are one-shot
/// commands and only take effect once the maze is completed.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub turn_delta: f32,
    pub forward: i8,
    pub strafe: i8,
    pub sprint: bool,
    pub restart: bool,
    pub quit: bool,
}

impl FrameInput {
    pub fn is_moving(&self) -> bool {
        self.forward != 0 || self.strafe != 0
    }

    pub fn forward(forward: i8) -> Self {
        Self { forward, ..Self::default() }
    }

    pub fn restart() -> Self {
        Self { restart: true, ..Self::default() }
    }

    pub fn quit() -> Self {
        Self { quit: true, ..Self::default() }
    }
}
