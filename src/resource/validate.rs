//! Structural validation of resources.
//!
//! Checks run against the original document, but any value quoted in an
//! issue is read from the masked copy, so sensitive values can never reach an
//! error message through this path.

use std::fmt;

use base64::Engine;
use serde_json::Value;

use super::Resource;
use crate::masking::{MaskedResource, CHANGED_PLACEHOLDER, PLACEHOLDER};

const MAX_EXCERPT: usize = 64;

/// One problem found in a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted field path, e.g. `data.password`.
    pub path: String,
    /// What is wrong.
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate `resource`, quoting values only from `masked`.
///
/// `masked` must be the redacted copy of `resource`.
pub fn validate_resource(resource: &Resource, masked: &MaskedResource) -> Vec<ValidationIssue> {
    let mut checker = Checker {
        original: resource.as_value(),
        masked: masked.as_value(),
        issues: Vec::new(),
    };

    checker.require_string(&["apiVersion"]);
    checker.require_string(&["kind"]);
    checker.require_string(&["metadata", "name"]);
    checker.string_map(&["metadata", "annotations"], false);

    let gk = resource.group_kind();
    if gk.group.is_empty() && gk.kind == "Secret" {
        checker.string_map(&["data"], true);
        checker.string_map(&["stringData"], false);
    }

    if !checker.issues.is_empty() {
        tracing::debug!(
            "{} {} has {} validation issues",
            gk,
            resource.name().unwrap_or("<unnamed>"),
            checker.issues.len()
        );
    }
    checker.issues
}

struct Checker<'a> {
    original: &'a Value,
    masked: &'a Value,
    issues: Vec<ValidationIssue>,
}

impl Checker<'_> {
    fn require_string(&mut self, segments: &[&str]) {
        match lookup(self.original, segments) {
            None | Some(Value::Null) => self.push(segments, "required field is missing".to_string()),
            Some(Value::String(_)) => {}
            Some(other) => self.type_mismatch(segments, "string", other),
        }
    }

    fn string_map(&mut self, segments: &[&str], base64_values: bool) {
        let entries = match lookup(self.original, segments) {
            None | Some(Value::Null) => return,
            Some(Value::Object(entries)) => entries,
            Some(other) => {
                self.type_mismatch(segments, "object", other);
                return;
            }
        };

        for (key, value) in entries {
            let mut path: Vec<&str> = segments.to_vec();
            path.push(key);
            match value {
                Value::String(s) if base64_values => {
                    if base64::engine::general_purpose::STANDARD
                        .decode(s.trim())
                        .is_err()
                    {
                        self.push(&path, "illegal base64 data".to_string());
                    }
                }
                Value::String(_) => {}
                other => self.type_mismatch(&path, "string", other),
            }
        }
    }

    fn type_mismatch(&mut self, segments: &[&str], expected: &str, actual: &Value) {
        let mut message = format!("expected {}, got {}", expected, type_name(actual));
        if let Some(excerpt) = self.excerpt(segments) {
            message.push_str(&format!(" ({})", excerpt));
        }
        self.push(segments, message);
    }

    fn excerpt(&self, segments: &[&str]) -> Option<String> {
        let value = self.masked.pointer(&json_pointer(segments))?;
        if let Some(s) = value.as_str() {
            if s == PLACEHOLDER || s == CHANGED_PLACEHOLDER {
                return None;
            }
        }
        let rendered = value.to_string();
        if rendered.chars().count() > MAX_EXCERPT {
            let cut: String = rendered.chars().take(MAX_EXCERPT).collect();
            Some(format!("{}...", cut))
        } else {
            Some(rendered)
        }
    }

    fn push(&mut self, segments: &[&str], message: String) {
        self.issues.push(ValidationIssue {
            path: segments.join("."),
            message,
        });
    }
}

fn lookup<'v>(value: &'v Value, segments: &[&str]) -> Option<&'v Value> {
    segments
        .iter()
        .try_fold(value, |current, segment| current.as_object()?.get(*segment))
}

fn json_pointer(segments: &[&str]) -> String {
    segments
        .iter()
        .map(|s| format!("/{}", s.replace('~', "~0").replace('/', "~1")))
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
