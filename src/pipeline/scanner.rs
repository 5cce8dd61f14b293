//! Folder scanning.
//!
//! Lists the entries of a single directory (no recursion) and keeps the
//! ones with a recognized image extension, in file-name order.

use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::PipelineError;

/// Extensions the pipeline accepts: two raster formats plus the layered
/// Photoshop format, matched case-insensitively.
const IMAGE_EXTENSIONS: [&str; 3] = ["psd", "png", "jpg"];

/// A single image file picked up by the scan. Transient: consumed by
/// the pipeline and not retained afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Full path to the input file
    pub path: PathBuf,
    /// Lowercased extension without the dot (e.g. "psd")
    pub extension: String,
}

/// Scan `dir` for image files.
///
/// Only plain files directly inside `dir` count; subdirectories and
/// unrecognized extensions are silently skipped. An unreadable directory
/// is an error. Zero matches is not an error here.
pub fn scan_folder(dir: &Path) -> Result<Vec<ImageFile>, PipelineError> {
    let mut images = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| PipelineError::Scan {
            path: dir.to_path_buf(),
            source: e,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(extension) = entry.path().extension() {
            let ext = extension.to_string_lossy().to_lowercase();
            if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                images.push(ImageFile {
                    path: entry.path().to_path_buf(),
                    extension: ext,
                });
            }
        }
    }

    Ok(images)
}

/// List every entry name in `dir`, files and folders alike, sorted.
/// Backs the confirmation pane shown after picking the input folder.
pub fn list_entries(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        names.push(entry.file_name().to_string_lossy().to_string());
    }

    Ok(names)
}
