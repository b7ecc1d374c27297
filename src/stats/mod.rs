//! Per-step statistics and their JSON-lines recorder

use crate::error::{TestbedError, TestbedResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// What one scene step reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStats {
    /// Simulated steps so far, including this one
    pub step: u64,
    pub tree_height: u32,
    pub minimum_height: u32,
    pub proxy_count: u32,
    pub body_count: usize,
    pub contact_count: usize,
    pub piece_count: usize,
}

/// Appends one JSON object per line to a file
pub struct StatsRecorder {
    path: PathBuf,
    writer: BufWriter<File>,
    records: u64,
}

impl StatsRecorder {
    /// Create (or truncate) the output file
    pub fn create(path: &Path) -> TestbedResult<Self> {
        let file = File::create(path).map_err(|e| io_error(path, e))?;
        log::info!("[StatsRecorder::create] Writing step stats to {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            records: 0,
        })
    }

    pub fn record(&mut self, stats: &StepStats) -> TestbedResult<()> {
        serde_json::to_writer(&mut self.writer, stats)?;
        self.writer
            .write_all(b"\n")
            .map_err(|e| io_error(&self.path, e))?;
        self.records += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> TestbedResult<()> {
        self.writer.flush().map_err(|e| io_error(&self.path, e))
    }

    pub fn records(&self) -> u64 {
        self.records
    }
}

fn io_error(path: &Path, error: std::io::Error) -> TestbedError {
    TestbedError::IoError {
        path: path.display().to_string(),
        error: error.to_string(),
    }
}
