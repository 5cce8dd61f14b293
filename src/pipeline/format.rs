//! Output format mapping.
//!
//! The output extension is derived from the input extension: layered
//! Photoshop documents are written as PNG, every other format keeps its
//! own extension. The encoder itself is picked later by
//! `DynamicImage::save` from the output path, so an extension with no
//! matching encoder surfaces as a save error and stops the batch.

use std::path::{Path, PathBuf};

use super::scanner::ImageFile;

/// Extension of the layered composite format.
pub const COMPOSITE_EXTENSION: &str = "psd";

/// Raster format composites are flattened into.
const FLATTENED_EXTENSION: &str = "png";

/// True if the file must be flattened before raster operations apply.
pub fn is_composite(file: &ImageFile) -> bool {
    file.extension == COMPOSITE_EXTENSION
}

/// Map an input extension to the output extension.
pub fn output_extension(extension: &str) -> String {
    let ext = extension.to_lowercase();
    if ext == COMPOSITE_EXTENSION {
        FLATTENED_EXTENSION.to_string()
    } else {
        ext
    }
}

/// Output path for `file` inside the session directory:
/// `<session dir>/<stem>.<mapped extension>`.
pub fn output_path(session_dir: &Path, file: &ImageFile) -> PathBuf {
    let stem = file.path.file_stem().unwrap_or_default().to_string_lossy();
    session_dir.join(format!("{}.{}", stem, output_extension(&file.extension)))
}
