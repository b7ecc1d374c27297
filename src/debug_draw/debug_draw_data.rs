//! Debug draw data - Pure DOP
//!
//! Text the testbed wants on screen this frame. A front end (or the log)
//! consumes the lines; nothing here renders.

use crate::constants::text::TEXT_LINE_START;

/// One string placed on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub x: i32,
    pub y: i32,
    pub text: String,
}

/// Per-frame text buffer plus the current line cursor
#[derive(Debug, Clone)]
pub struct DebugDrawData {
    pub lines: Vec<TextLine>,
    /// Vertical position the next string is drawn at
    pub text_line: i32,
}

impl Default for DebugDrawData {
    fn default() -> Self {
        Self {
            lines: Vec::new(),
            text_line: TEXT_LINE_START,
        }
    }
}
