//! Tetris scene data structures
//!
//! A tiled floor plus a stack of tetromino bodies dropped onto it. The scene
//! exists to stress the broad-phase tree: thousands of static tiles and a
//! handful of moving pieces.

use super::tetromino::PieceGenerator;
use crate::constants::tetris::{
    BLOCK_SIZE, DEFAULT_SEED, GROUND_COLUMNS, GROUND_HALF_EXTENT, GROUND_ROWS, MAX_PIECES,
    PIECE_DENSITY, PIECE_FRICTION, PIECE_RESTITUTION, SETTLE_SPEED, SETTLE_STEPS, SPAWN_POSITION,
};
use crate::physics::BodyId;
use crate::stats::StepStats;
use crate::testbed::TestbedData;
use serde::{Deserialize, Serialize};

/// Scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TetrisConfig {
    /// Floor tiles per row
    pub ground_columns: u32,
    /// Floor rows, stacked downward from y = 0
    pub ground_rows: u32,
    /// Half extent of a floor tile
    pub ground_half_extent: f32,

    /// Half extent of one piece block
    pub block_size: f32,
    pub spawn_position: [f32; 2],
    pub density: f32,
    pub restitution: f32,
    pub friction: f32,

    /// Pieces alive at once; further spawns are refused
    pub max_pieces: usize,
    /// Drop the next piece automatically once the active one has settled
    pub auto_spawn: bool,
    /// Consecutive settled steps required before auto-spawning
    pub settle_steps: u32,
    /// Speed under which the active piece counts as settled
    pub settle_speed: f32,

    /// `"random"` or a piece letter (I J L O S T Z)
    pub piece: String,
    pub seed: u64,
}

impl Default for TetrisConfig {
    fn default() -> Self {
        Self {
            ground_columns: GROUND_COLUMNS,
            ground_rows: GROUND_ROWS,
            ground_half_extent: GROUND_HALF_EXTENT,
            block_size: BLOCK_SIZE,
            spawn_position: SPAWN_POSITION,
            density: PIECE_DENSITY,
            restitution: PIECE_RESTITUTION,
            friction: PIECE_FRICTION,
            max_pieces: MAX_PIECES,
            auto_spawn: true,
            settle_steps: SETTLE_STEPS,
            settle_speed: SETTLE_SPEED,
            piece: "random".to_string(),
            seed: DEFAULT_SEED,
        }
    }
}

/// Running scene state
pub struct TetrisSceneData {
    pub config: TetrisConfig,
    pub testbed: TestbedData,
    /// Static body carrying every floor tile
    pub ground: BodyId,
    /// Every piece spawned so far, oldest first
    pub pieces: Vec<BodyId>,
    /// The piece keyboard input acts on
    pub active: Option<BodyId>,
    pub generator: PieceGenerator,
    /// Fixtures created by the scene (floor tiles and piece blocks)
    pub fixture_count: usize,
    /// Consecutive steps the active piece has been settled
    pub settle_counter: u32,
    /// Report from the most recent step
    pub last_stats: StepStats,
}
