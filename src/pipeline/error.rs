//! Error types for the resize pipeline.
//!
//! Validation failures are kept apart from pipeline failures: validation
//! runs before any I/O and only ever produces a status message, while a
//! pipeline error aborts the whole batch.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::state::settings::SettingsError;

/// Pre-flight check failures. The run never starts and nothing is
/// created or persisted.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Error: make sure every field is filled in.")]
    EmptyField,
    #[error("Error: the width must be a positive number.")]
    InvalidWidth,
}

/// Fatal run failures. Any one of these stops the batch where it is;
/// there is no per-file retry.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to create session folder {}: {source}", .path.display())]
    CreateSession { path: PathBuf, source: io::Error },

    #[error("failed to save settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("failed to scan input folder {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to decode composite {}: {reason}", .path.display())]
    DecodeComposite { path: PathBuf, reason: String },

    #[error("failed to open image {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to save image {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },
}
