//! Input data - key bindings and the actions they trigger
//!
//! NO METHODS. Just data.

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

/// Everything a key press can ask the testbed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    Rotate,
    Spawn,
    TogglePause,
    SingleStep,
    Restart,
}

/// One key per action. In config files keys are written with their winit
/// `KeyCode` names (`"ArrowLeft"`, `"KeyA"`, `"F5"`, `"ShiftLeft"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub rotate: KeyCode,
    pub spawn: KeyCode,
    pub pause: KeyCode,
    pub single_step: KeyCode,
    pub restart: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: KeyCode::ArrowLeft,
            move_right: KeyCode::ArrowRight,
            rotate: KeyCode::ArrowUp,
            spawn: KeyCode::Space,
            pause: KeyCode::KeyP,
            single_step: KeyCode::KeyO,
            restart: KeyCode::KeyR,
        }
    }
}
