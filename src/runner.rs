//! Headless runner
//!
//! Drives the Tetris scene for a fixed number of frames without a window:
//! scripted key presses stand in for the keyboard, the log stands in for the
//! screen, and step statistics can be written as JSON lines.

use crate::debug_draw::log_lines;
use crate::error::TestbedResult;
use crate::input::KeyCode;
use crate::scene::{create_tetris_scene, handle_key, step_tetris_scene};
use crate::stats::{StatsRecorder, StepStats};
use crate::TestbedConfig;
use serde::{Deserialize, Serialize};

/// A key press delivered before frame `step` is simulated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedKey {
    pub step: u64,
    pub key: KeyCode,
}

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames driven, paused ones included
    pub frames: u64,
    /// Frames that actually advanced the simulation
    pub steps_simulated: u64,
    pub pieces: usize,
    pub last: StepStats,
}

/// Run the scene described by `config` to completion
pub fn run_headless(config: &TestbedConfig) -> TestbedResult<RunSummary> {
    config.validate()?;

    let mut script: Vec<(u64, KeyCode)> = config
        .script
        .iter()
        .map(|entry| (entry.step, entry.key))
        .collect();
    script.sort_by_key(|(step, _)| *step);

    let mut settings = config.settings.clone();
    let mut scene = create_tetris_scene(&config.scene, &settings)?;
    let mut recorder = match &config.stats_path {
        Some(path) => Some(StatsRecorder::create(path)?),
        None => None,
    };

    log::info!(
        "[runner::run_headless] Running {} frames at {} Hz",
        config.steps,
        settings.hz
    );

    let mut last = StepStats::default();
    let mut next_key = 0;
    for frame in 0..config.steps {
        while let Some(&(step, key)) = script.get(next_key) {
            if step > frame {
                break;
            }
            if let Some(action) = handle_key(&mut scene, &mut settings, &config.bindings, key)? {
                log::debug!("[runner::run_headless] frame {}: {:?}", frame, action);
            }
            next_key += 1;
        }

        last = step_tetris_scene(&mut scene, &mut settings)?;

        if frame % config.log_every == 0 {
            log::info!(
                "[runner::run_headless] step {}: tree height {} (min {}), {} proxies, {} pieces",
                last.step,
                last.tree_height,
                last.minimum_height,
                last.proxy_count,
                last.piece_count
            );
            log_lines(&scene.testbed.draw);
        }

        if let Some(recorder) = recorder.as_mut() {
            recorder.record(&last)?;
        }
    }

    if let Some(recorder) = recorder.as_mut() {
        recorder.flush()?;
    }

    Ok(RunSummary {
        frames: config.steps,
        steps_simulated: scene.testbed.step_count,
        pieces: scene.pieces.len(),
        last,
    })
}
