//! Sensitivity classification.
//!
//! Sensitivity is decided by kind and path only, never by the value's type or
//! validity: a `data` entry that is a number is as sensitive as a string one.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use base64::Engine;
use serde_json::Value;

use crate::resource::{Resource, LAST_APPLIED_ANNOTATION};
use crate::rules::RuleSet;

/// A path flagged sensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    /// A whole field group that is present but not a mapping.
    Group(String),
    /// One entry of a sensitive field group, e.g. `data.password`.
    GroupEntry { group: String, key: String },
    /// The value of one annotation.
    Annotation(String),
    /// An annotation holding a serialized copy of the object.
    EmbeddedManifest(String),
}

impl FieldPath {
    /// The value at this path, if present.
    pub fn lookup<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        match self {
            Self::Group(group) => value.get(group),
            Self::GroupEntry { group, key } => value.get(group)?.as_object()?.get(key),
            Self::Annotation(key) | Self::EmbeddedManifest(key) => value
                .get("metadata")?
                .get("annotations")?
                .as_object()?
                .get(key),
        }
    }

    /// Mutable access to the value at this path, if present.
    pub fn lookup_mut<'a>(&self, value: &'a mut Value) -> Option<&'a mut Value> {
        match self {
            Self::Group(group) => value.get_mut(group),
            Self::GroupEntry { group, key } => value.get_mut(group)?.as_object_mut()?.get_mut(key),
            Self::Annotation(key) | Self::EmbeddedManifest(key) => value
                .get_mut("metadata")?
                .get_mut("annotations")?
                .as_object_mut()?
                .get_mut(key),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(group) => write!(f, "{}", group),
            Self::GroupEntry { group, key } => write!(f, "{}.{}", group, key),
            Self::Annotation(key) | Self::EmbeddedManifest(key) => {
                write!(f, "metadata.annotations[{}]", key)
            }
        }
    }
}

/// The set of sensitive paths for one resource under one rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensitivityDecision {
    paths: BTreeSet<FieldPath>,
    embedded: BTreeMap<String, SensitivityDecision>,
}

impl SensitivityDecision {
    /// Whether a path is sensitive.
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.paths.contains(path)
    }

    /// Sensitive paths in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldPath> {
        self.paths.iter()
    }

    /// Number of sensitive paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether nothing is sensitive.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Decision for the object embedded in an annotation, when it parsed.
    pub fn embedded(&self, annotation: &str) -> Option<&SensitivityDecision> {
        self.embedded.get(annotation)
    }

    /// Original textual forms of every sensitive value in `resource`.
    ///
    /// Strings are returned as-is, other scalars in their JSON rendering, and
    /// compound values both serialized whole and leaf by leaf. `data` entries
    /// also contribute their base64-decoded form. Empty strings are skipped.
    pub fn sensitive_values(&self, resource: &Resource) -> Vec<String> {
        let mut out = Vec::new();
        let root = resource.as_value();

        for path in &self.paths {
            let Some(value) = path.lookup(root) else {
                continue;
            };
            match path {
                FieldPath::EmbeddedManifest(key) => {
                    let embedded = value
                        .as_str()
                        .and_then(|s| serde_json::from_str::<Value>(s).ok())
                        .zip(self.embedded.get(key));
                    match embedded {
                        Some((parsed, decision)) => {
                            out.extend(decision.sensitive_values(&Resource::new(parsed)));
                        }
                        None => collect_texts(value, &mut out),
                    }
                }
                FieldPath::GroupEntry { group, .. } if group == "data" => {
                    collect_texts(value, &mut out);
                    if let Some(decoded) = value.as_str().and_then(decode_base64) {
                        out.push(decoded);
                    }
                }
                _ => collect_texts(value, &mut out),
            }
        }

        out.retain(|s| !s.is_empty());
        out
    }
}

fn collect_texts(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push(s.clone()),
        Value::Bool(_) | Value::Number(_) => out.push(value.to_string()),
        Value::Array(items) => {
            out.push(value.to_string());
            for item in items {
                collect_texts(item, out);
            }
        }
        Value::Object(map) => {
            out.push(value.to_string());
            for item in map.values() {
                collect_texts(item, out);
            }
        }
    }
}

fn decode_base64(encoded: &str) -> Option<String> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .ok()?;
    String::from_utf8(bytes).ok()
}

/// Decide which paths of `resource` are sensitive under `rules`.
///
/// 1. For always-sensitive kinds, every entry of each sensitive field group
///    is sensitive. A group that is present but not a mapping is sensitive
///    as a whole; a null or absent group contributes nothing.
/// 2. Every annotation whose key is configured as sensitive is sensitive.
/// 3. The last-applied-configuration annotation is classified as an embedded
///    manifest and its content classified recursively. This applies to
///    always-sensitive kinds, and to any kind once annotation keys are
///    configured. Outside always-sensitive kinds a parsed copy with nothing
///    sensitive inside is left verbatim; an unparsable one is masked whole.
///
/// Malformed structure never fails classification.
///
/// # Example
///
/// ```
/// use kubemask::masking::{classify, FieldPath};
/// use kubemask::resource::Resource;
/// use kubemask::rules::RuleSet;
/// use serde_json::json;
///
/// let secret = Resource::new(json!({
///     "apiVersion": "v1",
///     "kind": "Secret",
///     "metadata": {"name": "s", "annotations": {"token": "x", "app": "test"}},
///     "data": {"password": 12345}
/// }));
///
/// let decision = classify(&secret, &RuleSet::with_annotation_keys(["token"]));
/// assert!(decision.contains(&FieldPath::GroupEntry {
///     group: "data".into(),
///     key: "password".into()
/// }));
/// assert!(decision.contains(&FieldPath::Annotation("token".into())));
/// assert!(!decision.contains(&FieldPath::Annotation("app".into())));
/// ```
pub fn classify(resource: &Resource, rules: &RuleSet) -> SensitivityDecision {
    let mut decision = SensitivityDecision::default();
    let gk = resource.group_kind();
    let always_sensitive = rules.is_always_sensitive_kind(&gk);

    if always_sensitive {
        for group in rules.sensitive_field_groups(&gk) {
            match resource.field(group) {
                None | Some(Value::Null) => {}
                Some(Value::Object(entries)) => {
                    for key in entries.keys() {
                        decision.paths.insert(FieldPath::GroupEntry {
                            group: group.to_string(),
                            key: key.clone(),
                        });
                    }
                }
                Some(_) => {
                    decision.paths.insert(FieldPath::Group(group.to_string()));
                }
            }
        }
    }

    if let Some(annotations) = resource.annotations() {
        for (key, value) in annotations {
            if rules.is_sensitive_annotation(key) {
                decision.paths.insert(FieldPath::Annotation(key.clone()));
            } else if key == LAST_APPLIED_ANNOTATION
                && (always_sensitive || !rules.sensitive_annotation_keys().is_empty())
            {
                let parsed = value
                    .as_str()
                    .and_then(|s| serde_json::from_str::<Value>(s).ok())
                    .filter(Value::is_object);
                match parsed {
                    Some(parsed) => {
                        let inner = classify(&Resource::new(parsed), rules);
                        if always_sensitive || !inner.is_empty() {
                            decision
                                .paths
                                .insert(FieldPath::EmbeddedManifest(key.clone()));
                            decision.embedded.insert(key.clone(), inner);
                        }
                    }
                    None => {
                        decision
                            .paths
                            .insert(FieldPath::EmbeddedManifest(key.clone()));
                    }
                }
            }
        }
    }

    tracing::debug!(
        "Classified {} {}: {} sensitive paths",
        gk,
        resource.name().unwrap_or("<unnamed>"),
        decision.len()
    );
    decision
}
