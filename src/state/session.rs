//! Per-run bookkeeping shared between the worker and the form.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

/// Timestamp format for session directory names (minute resolution).
const SESSION_DIR_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// One run of the pipeline: its output directory and counters. Created
/// when a run starts, discarded when it ends; no run history is kept.
#[derive(Debug)]
pub struct RunSession {
    /// `<output folder>/<YYYY-MM-DD_HH-MM>`
    pub output_dir: PathBuf,
    pub total: usize,
    pub processed: usize,
}

impl RunSession {
    /// Create the timestamped session directory under `output_folder`,
    /// parents included. A directory left by a run in the same minute is
    /// reused.
    pub fn create(output_folder: &Path) -> io::Result<Self> {
        let stamp = Local::now().format(SESSION_DIR_FORMAT).to_string();
        let output_dir = output_folder.join(stamp);
        fs::create_dir_all(&output_dir)?;

        Ok(RunSession {
            output_dir,
            total: 0,
            processed: 0,
        })
    }
}

/// Snapshot of run progress, sent worker -> presentation thread. The
/// worker never touches widget state; the form only ever sees these
/// owned values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub processed: usize,
    pub total: usize,
    pub status: String,
}

impl ProgressUpdate {
    /// Progress as 0..=100 for the progress bar.
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.processed as f32 / self.total as f32 * 100.0
        }
    }
}

/// Terminal counts of a finished run. `total == 0` is the trivial
/// "no images" completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub total: usize,
}
