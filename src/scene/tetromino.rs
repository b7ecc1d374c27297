//! Tetromino shapes and piece selection

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The seven four-block pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tetromino {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl Tetromino {
    pub const ALL: [Tetromino; 7] = [
        Tetromino::I,
        Tetromino::J,
        Tetromino::L,
        Tetromino::O,
        Tetromino::S,
        Tetromino::T,
        Tetromino::Z,
    ];
}

impl fmt::Display for Tetromino {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tetromino::I => "I",
            Tetromino::J => "J",
            Tetromino::L => "L",
            Tetromino::O => "O",
            Tetromino::S => "S",
            Tetromino::T => "T",
            Tetromino::Z => "Z",
        };
        f.write_str(name)
    }
}

/// Block centers in block units, relative to the piece origin
pub fn cells(kind: Tetromino) -> [Vec2; 4] {
    let c = |x: f32, y: f32| Vec2::new(x, y);
    match kind {
        Tetromino::I => [c(-2.0, 0.0), c(-1.0, 0.0), c(0.0, 0.0), c(1.0, 0.0)],
        Tetromino::J => [c(-1.0, 1.0), c(-1.0, 0.0), c(0.0, 0.0), c(1.0, 0.0)],
        Tetromino::L => [c(1.0, 1.0), c(-1.0, 0.0), c(0.0, 0.0), c(1.0, 0.0)],
        Tetromino::O => [c(0.0, 0.0), c(1.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)],
        Tetromino::S => [c(-1.0, 0.0), c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)],
        Tetromino::T => [c(-1.0, 0.0), c(0.0, 0.0), c(1.0, 0.0), c(0.0, 1.0)],
        Tetromino::Z => [c(-1.0, 1.0), c(0.0, 1.0), c(0.0, 0.0), c(1.0, 0.0)],
    }
}

/// How the next piece is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceSelection {
    /// Always the same piece
    Fixed(Tetromino),
    /// Uniformly random, reproducible from the seed
    Random { seed: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown piece selection '{0}', expected 'random' or one of I J L O S T Z")]
pub struct PieceSelectionError(pub String);

impl FromStr for Tetromino {
    type Err = PieceSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Tetromino::ALL
            .iter()
            .copied()
            .find(|kind| kind.to_string() == upper)
            .ok_or_else(|| PieceSelectionError(s.to_string()))
    }
}

/// Parse `"random"` or a piece letter; `seed` feeds the random generator
pub fn parse_piece_selection(value: &str, seed: u64) -> Result<PieceSelection, PieceSelectionError> {
    if value.trim().eq_ignore_ascii_case("random") {
        Ok(PieceSelection::Random { seed })
    } else {
        value.parse().map(PieceSelection::Fixed)
    }
}

/// Yields piece kinds in spawn order
#[derive(Debug, Clone)]
pub enum PieceGenerator {
    Fixed(Tetromino),
    Random(StdRng),
}

pub fn create_piece_generator(selection: PieceSelection) -> PieceGenerator {
    match selection {
        PieceSelection::Fixed(kind) => PieceGenerator::Fixed(kind),
        PieceSelection::Random { seed } => PieceGenerator::Random(StdRng::seed_from_u64(seed)),
    }
}

pub fn next_piece(generator: &mut PieceGenerator) -> Tetromino {
    match generator {
        PieceGenerator::Fixed(kind) => *kind,
        PieceGenerator::Random(rng) => Tetromino::ALL[rng.gen_range(0..Tetromino::ALL.len())],
    }
}
