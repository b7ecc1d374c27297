/// Scene Module - the Tetris broad-phase stress scene
///
/// - tetromino.rs: piece shapes and selection
/// - tetris_data.rs: scene config and state
/// - tetris_operations.rs: building, steering and stepping the scene

pub mod tetris_data;
pub mod tetris_operations;
pub mod tetromino;

pub use tetris_data::{TetrisConfig, TetrisSceneData};

pub use tetris_operations::{
    // Construction
    create_tetris_scene,
    restart_tetris_scene,

    // Pieces
    spawn_piece,
    move_active_piece,
    rotate_active_piece,
    MoveDirection,

    // Input
    handle_key,

    // Stepping
    step_tetris_scene,
};

pub use tetromino::{
    cells, create_piece_generator, next_piece, parse_piece_selection, PieceGenerator,
    PieceSelection, PieceSelectionError, Tetromino,
};
