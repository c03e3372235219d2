//! Keyboard/mouse polling into a [`FrameInput`].
use raylib::prelude::*;

use crate::core::input::FrameInput;

#[inline]
fn axis(window: &RaylibHandle, positive: KeyboardKey, negative: KeyboardKey) -> i8 {
    window.is_key_down(positive) as i8 - window.is_key_down(negative) as i8
}

/// WASD moves, Shift sprints, horizontal mouse motion turns, R/Q restart/quit.
pub fn process_events(window: &RaylibHandle, mouse_sens: f32) -> FrameInput {
    let mouse = window.get_mouse_delta();
    FrameInput {
        turn_delta: mouse.x * mouse_sens,
        forward: axis(window, KeyboardKey::KEY_W, KeyboardKey::KEY_S),
        strafe: axis(window, KeyboardKey::KEY_D, KeyboardKey::KEY_A),
        sprint: window.is_key_down(KeyboardKey::KEY_LEFT_SHIFT)
            || window.is_key_down(KeyboardKey::KEY_RIGHT_SHIFT),
        restart: window.is_key_pressed(KeyboardKey::KEY_R),
        quit: window.is_key_pressed(KeyboardKey::KEY_Q),
    }
}
