//! Image loading.
//!
//! Layered Photoshop documents are flattened to a single raster, written
//! to the output path, and re-opened from there before the resize step;
//! the resized save then overwrites that intermediate at the same path.
//! Plain raster formats are opened directly.

use std::fs;
use std::path::Path;

use image::{DynamicImage, RgbaImage};
use psd::Psd;

use super::error::PipelineError;
use super::format;
use super::scanner::ImageFile;

/// Open `file` for resizing. `output_path` is where the flattened
/// composite intermediate lands for `.psd` inputs; other formats never
/// touch it here.
pub fn load_image(file: &ImageFile, output_path: &Path) -> Result<DynamicImage, PipelineError> {
    if format::is_composite(file) {
        flatten_composite(file, output_path)
    } else {
        image::open(&file.path).map_err(|e| PipelineError::Open {
            path: file.path.clone(),
            source: e,
        })
    }
}

/// Flatten a Photoshop document, persist the result at `output_path`,
/// and re-open the persisted raster.
fn flatten_composite(file: &ImageFile, output_path: &Path) -> Result<DynamicImage, PipelineError> {
    let bytes = fs::read(&file.path).map_err(|e| PipelineError::Read {
        path: file.path.clone(),
        source: e,
    })?;

    let psd = Psd::from_bytes(&bytes).map_err(|e| PipelineError::DecodeComposite {
        path: file.path.clone(),
        reason: e.to_string(),
    })?;

    let flattened = RgbaImage::from_raw(psd.width(), psd.height(), psd.rgba()).ok_or_else(|| {
        PipelineError::DecodeComposite {
            path: file.path.clone(),
            reason: "pixel buffer does not match the document dimensions".to_string(),
        }
    })?;

    DynamicImage::ImageRgba8(flattened)
        .save(output_path)
        .map_err(|e| PipelineError::Save {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    // The resize step works from the persisted raster, not the in-memory
    // composite; its save overwrites this same path.
    image::open(output_path).map_err(|e| PipelineError::Open {
        path: output_path.to_path_buf(),
        source: e,
    })
}
