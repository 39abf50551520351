//! Settings file discovery and loading.
//!
//! This module finds settings files under the project root and loads them in
//! priority order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::merger::merge_settings;
use crate::config::schema::Settings;
use crate::error::{MaskError, Result};

/// Directory holding settings files, relative to the project root.
pub const SETTINGS_DIR: &str = ".kubemask";

/// Paths to settings files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. Project settings (`.kubemask/settings.yml`)
/// 2. Local overrides (`.kubemask/settings.local.yml`)
#[derive(Debug, Clone)]
pub struct SettingsPaths {
    /// Project settings: .kubemask/settings.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .kubemask/settings.local.yml
    pub project_local: Option<PathBuf>,
}

impl SettingsPaths {
    /// Discover settings files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(SETTINGS_DIR).join("settings.yml")),
            project_local: existing(project_root.join(SETTINGS_DIR).join("settings.local.yml")),
        }
    }

    /// Returns all existing settings paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Load a single settings file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = read_settings(path)?;
    parse_settings(&content, path)
}

/// Parse YAML content into [`Settings`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    serde_yaml::from_str(content).map_err(|e| MaskError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a settings file as a raw YAML value (for merging).
pub fn load_settings_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read_settings(path)?;
    serde_yaml::from_str(&content).map_err(|e| MaskError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn read_settings(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MaskError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MaskError::Io(e)
        }
    })
}

/// Load and merge all settings files for a project.
///
/// Missing files are not an error: with no settings only the built-in rules
/// apply.
///
/// # Errors
///
/// Returns `ConfigParseError` if any settings file is invalid.
pub fn load_merged_settings(project_root: &Path) -> Result<Settings> {
    let paths = SettingsPaths::discover(project_root);
    let existing = paths.all_existing();

    if existing.is_empty() {
        tracing::debug!("No settings files under {}", project_root.display());
        return Ok(Settings::default());
    }

    let mut values = Vec::new();
    for path in existing {
        tracing::debug!("Loading settings from {}", path.display());
        values.push(load_settings_value(path)?);
    }

    let merged = merge_settings(&values);

    serde_yaml::from_value(merged).map_err(|e| MaskError::ConfigParseError {
        path: project_root.join(SETTINGS_DIR).join("settings.yml"),
        message: format!("Failed to parse merged settings: {}", e),
    })
}

/// Load settings with optional path override.
///
/// If `settings_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges all settings files.
pub fn load_settings(project_root: &Path, settings_override: Option<&Path>) -> Result<Settings> {
    if let Some(override_path) = settings_override {
        load_settings_file(override_path)
    } else {
        load_merged_settings(project_root)
    }
}
