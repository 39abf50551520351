//! Settings schema.
//!
//! Settings are a ConfigMap-shaped document: a flat `data` map of string
//! keys to string values. Other top-level fields (`apiVersion`, `kind`,
//! `metadata`) are accepted and ignored so an existing ConfigMap manifest can
//! be used directly.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MaskError, Result};

/// Comma-separated list of annotation keys masked on every kind.
pub const SENSITIVE_ANNOTATIONS_KEY: &str = "resource.sensitive.mask.annotations";

/// `"true"` to mark changed sensitive values in diffs.
pub const MARK_CHANGES_KEY: &str = "resource.sensitive.mask.diff.markChanges";

/// Root settings structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key-value settings.
    pub data: BTreeMap<String, String>,
}

impl Settings {
    /// Look up a raw setting.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Raw value of [`SENSITIVE_ANNOTATIONS_KEY`].
    pub fn sensitive_annotations(&self) -> Option<&str> {
        self.get(SENSITIVE_ANNOTATIONS_KEY)
    }

    /// Override [`SENSITIVE_ANNOTATIONS_KEY`].
    pub fn set_sensitive_annotations(&mut self, value: impl Into<String>) {
        self.data
            .insert(SENSITIVE_ANNOTATIONS_KEY.to_string(), value.into());
    }

    /// Parsed value of [`MARK_CHANGES_KEY`]; absent or empty means `false`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMaskRule` if the value is not `true` or `false`.
    pub fn mark_changes(&self) -> Result<bool> {
        match self.get(MARK_CHANGES_KEY).map(str::trim) {
            None | Some("") => Ok(false),
            Some(v) if v.eq_ignore_ascii_case("true") => Ok(true),
            Some(v) if v.eq_ignore_ascii_case("false") => Ok(false),
            Some(v) => Err(MaskError::InvalidMaskRule {
                setting: MARK_CHANGES_KEY.to_string(),
                message: format!("expected 'true' or 'false', got '{}'", v),
            }),
        }
    }
}
