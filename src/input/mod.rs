/// Input Module - Data-Oriented Programming (DOP) style
///
/// - input_data.rs: bindings and actions
/// - input_operations.rs: mapping keys to actions

pub mod input_data;
pub mod input_operations;

pub use input_data::{InputAction, KeyBindings};
pub use input_operations::map_key;

// Re-export so callers don't need winit for key codes
pub use winit::keyboard::KeyCode;
