//! Testbed and Tetris scene constants
//!
//! Single source of truth for the numbers the scene is built from.

/// Testbed host defaults
pub mod testbed {
    /// Simulation frequency (steps per second)
    pub const DEFAULT_HZ: f32 = 60.0;

    /// Solver iterations per step
    pub const DEFAULT_VELOCITY_ITERATIONS: usize = 8;

    /// Gravity applied to every dynamic body
    pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, -10.0];

    /// Headless run length when nothing else is configured
    pub const DEFAULT_STEPS: u64 = 600;

    /// How often (in steps) the debug text is flushed to the log
    pub const DEFAULT_LOG_EVERY: u64 = 60;

    /// Slack added around moving proxies before the tree has to refit them
    pub const PROXY_AABB_MARGIN: f32 = 0.1;
}

/// Debug text layout
pub mod text {
    /// Vertical position of the first text line
    pub const TEXT_LINE_START: i32 = 30;

    /// Vertical advance between text lines
    pub const DRAW_STRING_NEW_LINE: i32 = 16;

    /// Left margin for scene text
    pub const TEXT_MARGIN_X: i32 = 5;
}

/// Tetris scene geometry and materials
pub mod tetris {
    /// Half extent of a floor tile
    pub const GROUND_HALF_EXTENT: f32 = 0.5;

    /// Floor tiles per row
    pub const GROUND_COLUMNS: u32 = 200;

    /// Floor rows
    pub const GROUND_ROWS: u32 = 10;

    /// Half extent of one tetromino block
    pub const BLOCK_SIZE: f32 = 0.5;

    /// Where every new piece appears
    pub const SPAWN_POSITION: [f32; 2] = [0.0, 40.0];

    pub const PIECE_DENSITY: f32 = 5.0;
    pub const PIECE_RESTITUTION: f32 = 0.25;
    pub const PIECE_FRICTION: f32 = 0.5;

    /// Floor fixtures are massless
    pub const GROUND_DENSITY: f32 = 0.0;

    /// Floor tile friction, lower than the pieces'
    pub const GROUND_FRICTION: f32 = 0.2;

    /// Maximum number of pieces alive at once
    pub const MAX_PIECES: usize = 20;

    /// Consecutive settled steps before the next piece drops
    pub const SETTLE_STEPS: u32 = 30;

    /// Linear/angular speed under which a piece counts as settled
    pub const SETTLE_SPEED: f32 = 0.05;

    /// Seed used when random pieces are requested without one
    pub const DEFAULT_SEED: u64 = 0x7E7_215;
}
