/// Debug Draw Module - Data-Oriented Programming (DOP) style
///
/// - debug_draw_data.rs: the per-frame text buffer
/// - debug_draw_operations.rs: functions that fill and drain it

pub mod debug_draw_data;
pub mod debug_draw_operations;

pub use debug_draw_data::{DebugDrawData, TextLine};

pub use debug_draw_operations::{
    begin_frame, draw_line, draw_string, log_lines, new_line, take_lines,
};
