//! Batch pipeline orchestration.
//!
//! `Idle -> Validating -> Running -> {Completed, Failed}`. Validation
//! touches no I/O at all; everything after it runs synchronously on the
//! worker that calls `execute_run`, handing progress out as snapshots.

use std::path::{Path, PathBuf};

use crate::state::session::{BatchSummary, ProgressUpdate, RunSession};
use crate::state::settings::Settings;

use super::error::{PipelineError, ValidationError};
use super::{format, loader, resizer, scanner};

/// Progress is published after every `PROGRESS_EVERY`th file and on the
/// final file.
const PROGRESS_EVERY: usize = 10;

/// A validated, ready-to-run request.
#[derive(Debug, Clone)]
pub struct RunParams {
    pub input_folder: PathBuf,
    pub output_folder: PathBuf,
    pub width: u32,
}

/// Check the three form fields without touching the filesystem.
///
/// Both folders must be non-empty and the width must parse as a positive
/// integer. Nothing is created or persisted on failure.
pub fn validate(settings: &Settings) -> Result<RunParams, ValidationError> {
    if settings.input_folder.trim().is_empty() || settings.output_folder.trim().is_empty() {
        return Err(ValidationError::EmptyField);
    }

    let width: u32 = settings
        .new_width
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidWidth)?;
    if width == 0 {
        return Err(ValidationError::InvalidWidth);
    }

    Ok(RunParams {
        input_folder: PathBuf::from(settings.input_folder.trim()),
        output_folder: PathBuf::from(settings.output_folder.trim()),
        width,
    })
}

/// Run one batch: create the session directory, persist the submitted
/// settings, scan, then resize every image in scan order.
///
/// Any error aborts the run where it is; there is no per-file recovery
/// and no partial-completion report beyond the last published snapshot.
pub fn execute_run(
    params: &RunParams,
    settings_path: &Path,
    mut progress: impl FnMut(ProgressUpdate),
) -> Result<BatchSummary, PipelineError> {
    let mut session =
        RunSession::create(&params.output_folder).map_err(|e| PipelineError::CreateSession {
            path: params.output_folder.clone(),
            source: e,
        })?;

    Settings {
        input_folder: params.input_folder.to_string_lossy().to_string(),
        output_folder: params.output_folder.to_string_lossy().to_string(),
        new_width: params.width.to_string(),
    }
    .save(settings_path)?;

    let images = scanner::scan_folder(&params.input_folder)?;
    session.total = images.len();

    if images.is_empty() {
        progress(ProgressUpdate {
            processed: 0,
            total: 0,
            status: "No images to process.".to_string(),
        });
        return Ok(BatchSummary {
            processed: 0,
            total: 0,
        });
    }

    println!(
        "🔍 Resizing {} images from {} into {}",
        session.total,
        params.input_folder.display(),
        session.output_dir.display()
    );

    progress(ProgressUpdate {
        processed: 0,
        total: session.total,
        status: "Processing...".to_string(),
    });

    for file in &images {
        let output_path = format::output_path(&session.output_dir, file);

        let img = loader::load_image(file, &output_path)?;
        let resized = resizer::resize_to_width(&img, params.width);
        resized
            .save(&output_path)
            .map_err(|e| PipelineError::Save {
                path: output_path.clone(),
                source: e,
            })?;

        session.processed += 1;
        if session.processed % PROGRESS_EVERY == 0 || session.processed == session.total {
            progress(ProgressUpdate {
                processed: session.processed,
                total: session.total,
                status: format!(
                    "Processed {} of {} images.",
                    session.processed, session.total
                ),
            });
        }
    }

    println!("✅ Resize complete: {} images", session.processed);

    Ok(BatchSummary {
        processed: session.processed,
        total: session.total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn settings(input: &str, output: &str, width: &str) -> Settings {
        Settings {
            input_folder: input.to_string(),
            output_folder: output.to_string(),
            new_width: width.to_string(),
        }
    }

    fn write_rgba_png(path: &Path, width: u32, height: u32) {
        image::RgbaImage::from_pixel(width, height, image::Rgba([40, 80, 120, 255]))
            .save(path)
            .unwrap();
    }

    fn write_rgb_jpg(path: &Path, width: u32, height: u32) {
        image::RgbImage::from_pixel(width, height, image::Rgb([40, 80, 120]))
            .save(path)
            .unwrap();
    }

    /// The single session directory created inside `output`.
    fn session_dir(output: &Path) -> PathBuf {
        let mut entries: Vec<_> = fs::read_dir(output)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);
        entries.pop().unwrap()
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        assert!(matches!(
            validate(&settings("", "/out", "100")),
            Err(ValidationError::EmptyField)
        ));
        assert!(matches!(
            validate(&settings("/in", "", "100")),
            Err(ValidationError::EmptyField)
        ));
        assert!(matches!(
            validate(&settings("/in", "/out", "")),
            Err(ValidationError::InvalidWidth)
        ));
    }

    #[test]
    fn test_validate_rejects_bad_widths() {
        for bad in ["abc", "12.5", "-3", "0"] {
            assert!(matches!(
                validate(&settings("/in", "/out", bad)),
                Err(ValidationError::InvalidWidth)
            ));
        }
    }

    #[test]
    fn test_validate_accepts_and_trims() {
        let params = validate(&settings(" /in ", "/out", " 800 ")).unwrap();
        assert_eq!(params.input_folder, PathBuf::from("/in"));
        assert_eq!(params.output_folder, PathBuf::from("/out"));
        assert_eq!(params.width, 800);
    }

    #[test]
    fn test_run_resizes_every_image_in_order() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let config = tempdir().unwrap();
        let settings_path = config.path().join("settings.json");

        write_rgba_png(&input.path().join("a.png"), 100, 50);
        write_rgba_png(&input.path().join("b.png"), 3, 5);
        write_rgb_jpg(&input.path().join("c.jpg"), 7, 3);
        fs::write(input.path().join("skip.txt"), b"not an image").unwrap();
        fs::create_dir(input.path().join("nested")).unwrap();

        let params = RunParams {
            input_folder: input.path().to_path_buf(),
            output_folder: output.path().to_path_buf(),
            width: 10,
        };

        let mut updates = Vec::new();
        let summary = execute_run(&params, &settings_path, |u| updates.push(u)).unwrap();

        assert_eq!(summary, BatchSummary { processed: 3, total: 3 });

        let session = session_dir(output.path());
        let a = image::open(session.join("a.png")).unwrap();
        assert_eq!((a.width(), a.height()), (10, 5));
        let b = image::open(session.join("b.png")).unwrap();
        assert_eq!((b.width(), b.height()), (10, 17));
        let c = image::open(session.join("c.jpg")).unwrap();
        assert_eq!((c.width(), c.height()), (10, 4));

        // Initial snapshot plus the final one; the final is exactly 100%
        assert_eq!(updates.first().unwrap().processed, 0);
        let last = updates.last().unwrap();
        assert_eq!((last.processed, last.total), (3, 3));
        assert_eq!(last.percent(), 100.0);
        assert_eq!(last.status, "Processed 3 of 3 images.");
    }

    #[test]
    fn test_run_persists_submitted_settings() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let config = tempdir().unwrap();
        let settings_path = config.path().join("settings.json");

        let params = RunParams {
            input_folder: input.path().to_path_buf(),
            output_folder: output.path().to_path_buf(),
            width: 64,
        };

        execute_run(&params, &settings_path, |_| {}).unwrap();

        let stored = Settings::load(&settings_path);
        assert_eq!(stored.input_folder, input.path().to_string_lossy());
        assert_eq!(stored.output_folder, output.path().to_string_lossy());
        assert_eq!(stored.new_width, "64");
    }

    #[test]
    fn test_run_with_no_images_completes_trivially() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let config = tempdir().unwrap();
        let settings_path = config.path().join("settings.json");

        fs::write(input.path().join("notes.txt"), b"dummy").unwrap();

        let params = RunParams {
            input_folder: input.path().to_path_buf(),
            output_folder: output.path().to_path_buf(),
            width: 10,
        };

        let mut updates = Vec::new();
        let summary = execute_run(&params, &settings_path, |u| updates.push(u)).unwrap();

        assert_eq!(summary, BatchSummary { processed: 0, total: 0 });
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].status, "No images to process.");

        // The session directory exists but holds no output files
        let session = session_dir(output.path());
        assert_eq!(fs::read_dir(session).unwrap().count(), 0);
    }

    #[test]
    fn test_one_corrupt_file_aborts_the_batch() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let config = tempdir().unwrap();
        let settings_path = config.path().join("settings.json");

        fs::write(input.path().join("broken.png"), b"garbage bytes").unwrap();

        let params = RunParams {
            input_folder: input.path().to_path_buf(),
            output_folder: output.path().to_path_buf(),
            width: 10,
        };

        let result = execute_run(&params, &settings_path, |_| {});
        assert!(result.is_err());
    }

    #[test]
    fn test_progress_published_every_tenth_file_and_on_the_last() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let config = tempdir().unwrap();
        let settings_path = config.path().join("settings.json");

        for i in 0..12 {
            write_rgba_png(&input.path().join(format!("img_{:02}.png", i)), 4, 4);
        }

        let params = RunParams {
            input_folder: input.path().to_path_buf(),
            output_folder: output.path().to_path_buf(),
            width: 2,
        };

        let mut milestones = Vec::new();
        let summary = execute_run(&params, &settings_path, |u| milestones.push(u.processed))
            .unwrap();

        assert_eq!(summary, BatchSummary { processed: 12, total: 12 });
        assert_eq!(milestones, vec![0, 10, 12]);
    }
}
