//! Settings loading and parsing.
//!
//! This module handles:
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Deep merging in [`merger`]
//!
//! # Example
//!
//! ```
//! use kubemask::config::load_merged_settings;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".kubemask");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(
//!     dir.join("settings.yml"),
//!     "data:\n  resource.sensitive.mask.annotations: token\n",
//! )
//! .unwrap();
//!
//! let settings = load_merged_settings(temp.path()).unwrap();
//! assert_eq!(settings.sensitive_annotations(), Some("token"));
//! ```
//!
//! # Settings File Locations
//!
//! Settings are discovered and merged in this order:
//! 1. Project settings (`.kubemask/settings.yml`)
//! 2. Local overrides (`.kubemask/settings.local.yml`)

pub mod loader;
pub mod merger;
pub mod schema;

pub use schema::{Settings, MARK_CHANGES_KEY, SENSITIVE_ANNOTATIONS_KEY};

pub use loader::{
    load_merged_settings, load_settings, load_settings_file, load_settings_value, parse_settings,
    SettingsPaths, SETTINGS_DIR,
};

pub use merger::{deep_merge, merge_settings};
