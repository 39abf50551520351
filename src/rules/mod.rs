//! Masking rules.
//!
//! A [`RuleSet`] is an immutable snapshot describing what is sensitive:
//!
//! - [`ALWAYS_SENSITIVE_KINDS`] - Built-in kinds whose data-bearing field
//!   groups are always masked. Configuration can never remove these.
//! - Sensitive annotation keys - Empty by default, set from the
//!   `resource.sensitive.mask.annotations` setting.
//!
//! [`RuleStore`] holds the current snapshot and swaps it atomically when the
//! configuration changes.
//!
//! # Example
//!
//! ```
//! use kubemask::resource::GroupKind;
//! use kubemask::rules::{RuleSet, RuleStore};
//!
//! let store = RuleStore::new(RuleSet::new());
//! let secret = GroupKind::new("", "Secret");
//!
//! let before = store.snapshot();
//! assert!(before.is_always_sensitive_kind(&secret));
//! assert!(before.sensitive_annotation_keys().is_empty());
//!
//! store.set_sensitive_annotation_keys(["token"]);
//! assert!(store.snapshot().is_sensitive_annotation("token"));
//! // Snapshots taken earlier are unaffected
//! assert!(!before.is_sensitive_annotation("token"));
//! ```

pub mod keys;
pub mod store;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::Settings;
use crate::error::Result;
use crate::resource::GroupKind;

pub use keys::parse_annotation_keys;
pub use store::RuleStore;

/// Built-in always-sensitive kinds as (group, kind, field groups).
pub const ALWAYS_SENSITIVE_KINDS: &[(&str, &str, &[&str])] =
    &[("", "Secret", &["data", "stringData"])];

/// How sensitive values that changed between live and target are shown in
/// a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaceholderStyle {
    /// Both sides use the same placeholder; changes to sensitive values are
    /// invisible in the diff.
    #[default]
    Uniform,
    /// A changed sensitive value is shown with a distinct fixed marker on
    /// the target side.
    MarkChanged,
}

/// An immutable snapshot of the masking rules.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSet {
    annotation_keys: BTreeSet<String>,
    placeholder_style: PlaceholderStyle,
}

impl RuleSet {
    /// Built-in rules only: no annotation masking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in rules plus the given sensitive annotation keys.
    pub fn with_annotation_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            annotation_keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Build a rule set from settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidMaskRule` if the annotation list contains an invalid
    /// key or the diff style flag is not a boolean.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let annotation_keys = match settings.sensitive_annotations() {
            Some(raw) => parse_annotation_keys(raw)?,
            None => BTreeSet::new(),
        };
        let placeholder_style = if settings.mark_changes()? {
            PlaceholderStyle::MarkChanged
        } else {
            PlaceholderStyle::Uniform
        };

        Ok(Self {
            annotation_keys,
            placeholder_style,
        })
    }

    /// Return a copy with a different placeholder style.
    pub fn with_placeholder_style(mut self, style: PlaceholderStyle) -> Self {
        self.placeholder_style = style;
        self
    }

    /// Whether the kind has built-in sensitive field groups.
    pub fn is_always_sensitive_kind(&self, kind: &GroupKind) -> bool {
        builtin_groups(kind).is_some()
    }

    /// Field groups always masked for the kind; empty for other kinds.
    pub fn sensitive_field_groups(&self, kind: &GroupKind) -> BTreeSet<&'static str> {
        builtin_groups(kind)
            .map(|groups| groups.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Annotation keys masked on every kind.
    pub fn sensitive_annotation_keys(&self) -> &BTreeSet<String> {
        &self.annotation_keys
    }

    /// Whether a single annotation key is masked.
    pub fn is_sensitive_annotation(&self, key: &str) -> bool {
        self.annotation_keys.contains(key)
    }

    /// Diff placeholder style.
    pub fn placeholder_style(&self) -> PlaceholderStyle {
        self.placeholder_style
    }

    /// Serializable view of the rules, for display.
    pub fn summary(&self) -> RuleSummary {
        RuleSummary {
            always_sensitive: ALWAYS_SENSITIVE_KINDS
                .iter()
                .map(|(group, kind, fields)| KindRule {
                    group: group.to_string(),
                    kind: kind.to_string(),
                    fields: fields.iter().map(|f| f.to_string()).collect(),
                })
                .collect(),
            annotations: self.annotation_keys.iter().cloned().collect(),
            placeholder_style: self.placeholder_style,
        }
    }
}

fn builtin_groups(kind: &GroupKind) -> Option<&'static [&'static str]> {
    ALWAYS_SENSITIVE_KINDS
        .iter()
        .find(|(group, k, _)| *group == kind.group && *k == kind.kind)
        .map(|(_, _, groups)| *groups)
}

/// Display form of a [`RuleSet`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSummary {
    pub always_sensitive: Vec<KindRule>,
    pub annotations: Vec<String>,
    pub placeholder_style: PlaceholderStyle,
}

/// One always-sensitive kind.
#[derive(Debug, Clone, Serialize)]
pub struct KindRule {
    pub group: String,
    pub kind: String,
    pub fields: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MARK_CHANGES_KEY, SENSITIVE_ANNOTATIONS_KEY};

    fn secret() -> GroupKind {
        GroupKind::new("", "Secret")
    }

    #[test]
    fn secret_is_always_sensitive() {
        let rules = RuleSet::new();
        assert!(rules.is_always_sensitive_kind(&secret()));
        let groups = rules.sensitive_field_groups(&secret());
        assert!(groups.contains("data"));
        assert!(groups.contains("stringData"));
    }

    #[test]
    fn secret_in_other_group_is_not_builtin() {
        let rules = RuleSet::new();
        let gk = GroupKind::new("example.com", "Secret");
        assert!(!rules.is_always_sensitive_kind(&gk));
    }

    #[test]
    fn unknown_kind_has_no_groups() {
        let rules = RuleSet::new();
        let gk = GroupKind::new("", "ConfigMap");
        assert!(!rules.is_always_sensitive_kind(&gk));
        assert!(rules.sensitive_field_groups(&gk).is_empty());
    }

    #[test]
    fn annotation_keys_are_empty_by_default() {
        assert!(RuleSet::new().sensitive_annotation_keys().is_empty());
    }

    #[test]
    fn with_annotation_keys_sets_keys() {
        let rules = RuleSet::with_annotation_keys(["token", "vault.io/path"]);
        assert!(rules.is_sensitive_annotation("token"));
        assert!(rules.is_sensitive_annotation("vault.io/path"));
        assert!(!rules.is_sensitive_annotation("app"));
    }

    #[test]
    fn annotation_keys_do_not_disable_builtin_kinds() {
        let rules = RuleSet::with_annotation_keys(Vec::<String>::new());
        assert!(rules.is_always_sensitive_kind(&secret()));
    }

    #[test]
    fn from_settings_reads_annotation_list() {
        let mut settings = Settings::default();
        settings
            .data
            .insert(SENSITIVE_ANNOTATIONS_KEY.to_string(), "token, other".to_string());

        let rules = RuleSet::from_settings(&settings).unwrap();
        assert_eq!(rules.sensitive_annotation_keys().len(), 2);
        assert_eq!(rules.placeholder_style(), PlaceholderStyle::Uniform);
    }

    #[test]
    fn from_settings_reads_mark_changes() {
        let mut settings = Settings::default();
        settings
            .data
            .insert(MARK_CHANGES_KEY.to_string(), "true".to_string());

        let rules = RuleSet::from_settings(&settings).unwrap();
        assert_eq!(rules.placeholder_style(), PlaceholderStyle::MarkChanged);
    }

    #[test]
    fn from_settings_rejects_invalid_key() {
        let mut settings = Settings::default();
        settings
            .data
            .insert(SENSITIVE_ANNOTATIONS_KEY.to_string(), "not a key".to_string());

        assert!(RuleSet::from_settings(&settings).is_err());
    }

    #[test]
    fn summary_lists_builtins_and_annotations() {
        let summary = RuleSet::with_annotation_keys(["token"]).summary();
        assert_eq!(summary.always_sensitive[0].kind, "Secret");
        assert_eq!(summary.always_sensitive[0].fields, vec!["data", "stringData"]);
        assert_eq!(summary.annotations, vec!["token"]);
    }
}
