//! Debug draw operations

use super::debug_draw_data::{DebugDrawData, TextLine};
use crate::constants::text::{DRAW_STRING_NEW_LINE, TEXT_LINE_START};

/// Start a new frame: drop last frame's text and rewind the cursor
pub fn begin_frame(draw: &mut DebugDrawData) {
    draw.lines.clear();
    draw.text_line = TEXT_LINE_START;
}

/// Queue `text` at the current line
pub fn draw_string(draw: &mut DebugDrawData, x: i32, text: impl Into<String>) {
    let y = draw.text_line;
    draw.lines.push(TextLine {
        x,
        y,
        text: text.into(),
    });
}

/// Move the cursor down one line
pub fn new_line(draw: &mut DebugDrawData) {
    draw.text_line += DRAW_STRING_NEW_LINE;
}

/// Queue `text` and advance
pub fn draw_line(draw: &mut DebugDrawData, x: i32, text: impl Into<String>) {
    draw_string(draw, x, text);
    new_line(draw);
}

/// Hand the queued lines to the caller, leaving the buffer empty
pub fn take_lines(draw: &mut DebugDrawData) -> Vec<TextLine> {
    std::mem::take(&mut draw.lines)
}

/// Emit queued lines through the log at debug level
pub fn log_lines(draw: &DebugDrawData) {
    for line in &draw.lines {
        log::debug!("[debug_draw] ({}, {}) {}", line.x, line.y, line.text);
    }
}
