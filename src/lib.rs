// Tetris Testbed - broad-phase stress scene over rapier2d
//
// Data-Oriented layout, same as the rest of the engine code:
// - *_data modules hold plain state
// - *_operations modules hold the functions that transform it
//
// For new code, prefer:
// - physics operations for anything that touches the engine
// - scene operations for Tetris behaviour
// - runner::run_headless to drive a whole session

// Constants module
pub mod constants;

// Core modules
pub mod error;

// Essential systems
pub mod debug_draw;
pub mod input;
pub mod physics;
pub mod scene;
pub mod testbed;

// Utilities
pub mod runner;
pub mod stats;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{OptionExt, TestbedError, TestbedResult};
pub use input::{InputAction, KeyBindings, KeyCode};
pub use physics::{BodyId, TreeStats};
pub use runner::{run_headless, RunSummary, ScriptedKey};
pub use scene::{TetrisConfig, TetrisSceneData, Tetromino};
pub use stats::{StatsRecorder, StepStats};
pub use testbed::{Settings, TestbedData};

/// Main testbed configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TestbedConfig {
    /// Frames to drive in a headless run
    pub steps: u64,
    /// Log the debug text every this many frames
    pub log_every: u64,
    /// Optional JSON-lines output for per-step statistics
    pub stats_path: Option<PathBuf>,
    #[serde(rename = "testbed")]
    pub settings: Settings,
    pub scene: TetrisConfig,
    #[serde(rename = "input")]
    pub bindings: KeyBindings,
    pub script: Vec<ScriptedKey>,
}

impl Default for TestbedConfig {
    fn default() -> Self {
        Self {
            steps: constants::testbed::DEFAULT_STEPS,
            log_every: constants::testbed::DEFAULT_LOG_EVERY,
            stats_path: None,
            settings: Settings::default(),
            scene: TetrisConfig::default(),
            bindings: KeyBindings::default(),
            script: Vec::new(),
        }
    }
}

impl TestbedConfig {
    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> TestbedResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file
    pub fn load(path: &Path) -> TestbedResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| TestbedError::IoError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("[TestbedConfig::load] Loaded {}", path.display());
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> TestbedResult<()> {
        let settings = &self.settings;
        if !settings.hz.is_finite() || settings.hz <= 0.0 {
            return Err(invalid("testbed.hz", settings.hz, "must be a positive number"));
        }
        if settings.velocity_iterations == 0 {
            return Err(invalid(
                "testbed.velocity_iterations",
                settings.velocity_iterations,
                "must be at least 1",
            ));
        }
        if settings.gravity.iter().any(|g| !g.is_finite()) {
            return Err(invalid(
                "testbed.gravity",
                format!("{:?}", settings.gravity),
                "must be finite",
            ));
        }

        let scene = &self.scene;
        if scene.ground_columns == 0 {
            return Err(invalid("scene.ground_columns", scene.ground_columns, "cannot be 0"));
        }
        if scene.ground_rows == 0 {
            return Err(invalid("scene.ground_rows", scene.ground_rows, "cannot be 0"));
        }
        if scene.ground_half_extent.is_nan() || scene.ground_half_extent <= 0.0 {
            return Err(invalid(
                "scene.ground_half_extent",
                scene.ground_half_extent,
                "must be positive",
            ));
        }
        if scene.block_size.is_nan() || scene.block_size <= 0.0 {
            return Err(invalid("scene.block_size", scene.block_size, "must be positive"));
        }
        if scene.density.is_nan() || scene.density < 0.0 {
            return Err(invalid("scene.density", scene.density, "cannot be negative"));
        }
        if scene.friction.is_nan() || scene.friction < 0.0 {
            return Err(invalid("scene.friction", scene.friction, "cannot be negative"));
        }
        if !(0.0..=1.0).contains(&scene.restitution) {
            return Err(invalid(
                "scene.restitution",
                scene.restitution,
                "must be between 0 and 1",
            ));
        }
        if scene.settle_speed.is_nan() || scene.settle_speed < 0.0 {
            return Err(invalid("scene.settle_speed", scene.settle_speed, "cannot be negative"));
        }
        if let Err(e) = scene::parse_piece_selection(&scene.piece, scene.seed) {
            return Err(invalid("scene.piece", &scene.piece, &e.to_string()));
        }

        if self.log_every == 0 {
            return Err(invalid("log_every", self.log_every, "cannot be 0"));
        }

        log::debug!("[TestbedConfig] Configuration validated successfully");
        Ok(())
    }
}

fn invalid(field: &str, value: impl std::fmt::Display, reason: &str) -> TestbedError {
    TestbedError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
