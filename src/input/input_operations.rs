//! Input operations - key-to-action mapping

use super::input_data::{InputAction, KeyBindings};
use winit::keyboard::KeyCode;

/// Action bound to `key`, if any. Earlier bindings win when a key is bound
/// twice.
pub fn map_key(bindings: &KeyBindings, key: KeyCode) -> Option<InputAction> {
    let table = [
        (bindings.move_left, InputAction::MoveLeft),
        (bindings.move_right, InputAction::MoveRight),
        (bindings.rotate, InputAction::Rotate),
        (bindings.spawn, InputAction::Spawn),
        (bindings.pause, InputAction::TogglePause),
        (bindings.single_step, InputAction::SingleStep),
        (bindings.restart, InputAction::Restart),
    ];

    table
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|(_, action)| *action)
}
