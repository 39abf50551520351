//! Redaction of classified resources.

use serde::Serialize;
use serde_json::Value;

use super::classify::{classify, FieldPath, SensitivityDecision};
use super::{CHANGED_PLACEHOLDER, PLACEHOLDER};
use crate::error::{MaskError, Result};
use crate::resource::Resource;
use crate::rules::{PlaceholderStyle, RuleSet};

/// A redacted copy of a resource.
///
/// Only produced by the redactor, so holding one means every sensitive value
/// has been replaced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MaskedResource {
    value: Value,
}

impl MaskedResource {
    /// The redacted document.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Consume, returning the redacted document.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Serialize as a YAML document.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.value).map_err(|e| MaskError::RenderError {
            what: "manifest".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.value).map_err(|e| MaskError::RenderError {
            what: "manifest".to_string(),
            message: e.to_string(),
        })
    }
}

/// Produce a redacted deep copy of `resource`.
///
/// Every path in `decision` is replaced by [`PLACEHOLDER`]; everything else is
/// copied verbatim. Paths that are absent in the document are skipped.
pub fn redact(resource: &Resource, decision: &SensitivityDecision) -> MaskedResource {
    redact_with(resource, decision, |_| PLACEHOLDER)
}

/// Redact both sides of a diff pair under one rule set snapshot.
///
/// With [`PlaceholderStyle::MarkChanged`], a sensitive value present on both
/// sides with differing originals is shown on the target side as
/// [`CHANGED_PLACEHOLDER`].
pub fn redact_pair(
    live: Option<&Resource>,
    target: Option<&Resource>,
    rules: &RuleSet,
) -> (Option<MaskedResource>, Option<MaskedResource>) {
    let live_decision = live.map(|res| classify(res, rules));
    let target_decision = target.map(|res| classify(res, rules));

    let masked_live = live
        .zip(live_decision.as_ref())
        .map(|(res, decision)| redact(res, decision));

    let masked_target = match (target, target_decision.as_ref()) {
        (Some(target_res), Some(decision)) => Some(match (rules.placeholder_style(), live) {
            (PlaceholderStyle::MarkChanged, Some(live_res)) => {
                redact_with(target_res, decision, |path| {
                    if changed(path, live_res, target_res) {
                        CHANGED_PLACEHOLDER
                    } else {
                        PLACEHOLDER
                    }
                })
            }
            _ => redact(target_res, decision),
        }),
        _ => None,
    };

    (masked_live, masked_target)
}

fn changed(path: &FieldPath, live: &Resource, target: &Resource) -> bool {
    if matches!(path, FieldPath::EmbeddedManifest(_)) {
        return false;
    }
    match (path.lookup(live.as_value()), path.lookup(target.as_value())) {
        (Some(before), Some(after)) => before != after,
        _ => false,
    }
}

fn redact_with<'p>(
    resource: &Resource,
    decision: &SensitivityDecision,
    placeholder: impl Fn(&FieldPath) -> &'p str,
) -> MaskedResource {
    let mut value = resource.as_value().clone();

    for path in decision.iter() {
        let Some(slot) = path.lookup_mut(&mut value) else {
            continue;
        };
        *slot = match path {
            FieldPath::EmbeddedManifest(key) => redact_embedded(slot, decision.embedded(key)),
            _ => Value::String(placeholder(path).to_string()),
        };
    }

    MaskedResource { value }
}

fn redact_embedded(original: &Value, decision: Option<&SensitivityDecision>) -> Value {
    let Some(text) = original.as_str() else {
        return Value::String(PLACEHOLDER.to_string());
    };
    let parsed = serde_json::from_str::<Value>(text).ok();

    match (parsed, decision) {
        (Some(parsed), Some(decision)) => {
            let masked = redact(&Resource::new(parsed), decision);
            match serde_json::to_string(masked.as_value()) {
                Ok(mut serialized) => {
                    if text.ends_with('\n') {
                        serialized.push('\n');
                    }
                    Value::String(serialized)
                }
                Err(_) => Value::String(PLACEHOLDER.to_string()),
            }
        }
        _ => Value::String(PLACEHOLDER.to_string()),
    }
}
