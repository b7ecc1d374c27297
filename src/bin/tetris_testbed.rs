//! CLI entry point for the headless Tetris testbed.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tetris_testbed::{run_headless, TestbedConfig};

#[derive(Parser)]
#[command(name = "tetris-testbed")]
#[command(about = "Drop tetrominoes on a tiled floor and report broad-phase tree statistics")]
struct Cli {
    /// Path to a TOML config file (defaults are used when omitted)
    config: Option<PathBuf>,
    /// Override the number of frames to run
    #[arg(long)]
    steps: Option<u64>,
    /// Override the piece generator seed
    #[arg(long)]
    seed: Option<u64>,
    /// Write per-step statistics as JSON lines to this path
    #[arg(long)]
    stats: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => TestbedConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => TestbedConfig::default(),
    };

    if let Some(steps) = cli.steps {
        config.steps = steps;
    }
    if let Some(seed) = cli.seed {
        config.scene.seed = seed;
    }
    if let Some(stats) = cli.stats {
        config.stats_path = Some(stats);
    }

    let summary = match run_headless(&config) {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("[main] Run failed: {}", e);
            return Err(e).context("running tetris testbed");
        }
    };

    log::info!(
        "[main] Done: {} frames, {} simulated, {} pieces, final tree height {} (min {})",
        summary.frames,
        summary.steps_simulated,
        summary.pieces,
        summary.last.tree_height,
        summary.last.minimum_height
    );
    Ok(())
}
