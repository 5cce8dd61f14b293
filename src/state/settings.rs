//! Persistent form settings.
//!
//! Three string fields, stored as one flat JSON object under the user's
//! config directory. A missing or unreadable file just yields empty
//! defaults, so the form starts blank on first launch.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from persisting settings to disk.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The three form fields, as last submitted.
///
/// Overwritten on every run start and read back when the form opens, so
/// the fields repopulate with whatever the user last ran.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    /// Folder scanned for images
    #[serde(rename = "InputFolder", default)]
    pub input_folder: String,
    /// Folder session output directories are created under
    #[serde(rename = "OutputFolder", default)]
    pub output_folder: String,
    /// Target width, kept as the string the user typed
    #[serde(rename = "NewWidth", default)]
    pub new_width: String,
}

impl Settings {
    /// Where the settings file lives:
    /// `<config dir>/image-resizer/settings.json`.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(|| dirs::home_dir())
            .unwrap_or_else(|| PathBuf::from("."));

        path.push("image-resizer");
        path.push("settings.json");
        path
    }

    /// Load settings from `path`. Absence or corruption yields defaults.
    pub fn load(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default()
    }

    /// Persist to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let settings = Settings {
            input_folder: "/photos/in".to_string(),
            output_folder: "/photos/out".to_string(),
            new_width: "1920".to_string(),
        };
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn test_disk_format_key_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        Settings {
            input_folder: "in".to_string(),
            output_folder: "out".to_string(),
            new_width: "800".to_string(),
        }
        .save(&path)
        .unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"InputFolder\""));
        assert!(raw.contains("\"OutputFolder\""));
        assert!(raw.contains("\"NewWidth\""));
    }

    #[test]
    fn test_missing_file_yields_empty_defaults() {
        let dir = tempdir().unwrap();
        let loaded = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_corrupt_file_yields_empty_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json at all").unwrap();

        assert_eq!(Settings::load(&path), Settings::default());
    }
}
