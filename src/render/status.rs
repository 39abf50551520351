//! Operation status hook.
//!
//! Failure messages are assembled from masked data and then scrubbed of
//! every original sensitive value before they can be stored. An
//! [`OperationState`] only accepts a [`MaskedMessage`], and the only way to
//! obtain one is [`mask_message`].

use std::fmt;

use serde::Serialize;

use crate::masking::{classify, mask_resource, MessageMasker};
use crate::resource::{validate_resource, Resource};
use crate::rules::RuleSet;

/// A message that has been scrubbed of sensitive values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MaskedMessage(String);

impl MaskedMessage {
    /// The scrubbed text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaskedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scrub `message` of every sensitive value found in `resources`.
///
/// Pass every resource the message may quote, including live copies, so
/// that prior values are scrubbed too.
///
/// # Example
///
/// ```
/// use kubemask::render::mask_message;
/// use kubemask::resource::Resource;
/// use kubemask::rules::RuleSet;
/// use serde_json::json;
///
/// let secret = Resource::new(json!({
///     "apiVersion": "v1",
///     "kind": "Secret",
///     "data": {"password": 12345}
/// }));
///
/// let message = mask_message("cannot convert 12345 to string", [&secret], &RuleSet::new());
/// assert_eq!(message.as_str(), "cannot convert ++++++++ to string");
/// ```
pub fn mask_message<'a>(
    message: &str,
    resources: impl IntoIterator<Item = &'a Resource>,
    rules: &RuleSet,
) -> MaskedMessage {
    let mut masker = MessageMasker::new();
    for resource in resources {
        masker.add_values(classify(resource, rules).sensitive_values(resource));
    }
    MaskedMessage(masker.mask(message))
}

/// Phase of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OperationPhase {
    Succeeded,
    Failed,
}

/// Recorded outcome of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationState {
    pub phase: OperationPhase,
    pub message: MaskedMessage,
}

impl OperationState {
    /// A successful operation.
    pub fn succeeded(message: MaskedMessage) -> Self {
        Self {
            phase: OperationPhase::Succeeded,
            message,
        }
    }

    /// A failed operation.
    pub fn failed(message: MaskedMessage) -> Self {
        Self {
            phase: OperationPhase::Failed,
            message,
        }
    }

    /// Whether the operation failed.
    pub fn is_failed(&self) -> bool {
        self.phase == OperationPhase::Failed
    }
}

/// Validate `target` resources as an apply operation would.
///
/// Issue text is built from masked copies, and the final message is
/// scrubbed of values from both `target` and `live`.
pub fn validate_operation(
    target: &[Resource],
    live: &[Resource],
    rules: &RuleSet,
) -> OperationState {
    let mut failures = Vec::new();

    for resource in target {
        let masked = mask_resource(resource, rules);
        let issues = validate_resource(resource, &masked);
        if issues.is_empty() {
            continue;
        }
        let details: Vec<String> = issues.iter().map(ToString::to_string).collect();
        failures.push(format!(
            "{} {:?} is invalid: {}",
            resource.kind().unwrap_or("<unknown kind>"),
            resource.name().unwrap_or_default(),
            details.join(", ")
        ));
    }

    let resources = target.iter().chain(live.iter());
    if failures.is_empty() {
        let message = format!("successfully validated {} resources", target.len());
        return OperationState::succeeded(mask_message(&message, resources, rules));
    }

    tracing::warn!(
        "{} of {} resources failed validation",
        failures.len(),
        target.len()
    );
    let message = format!(
        "one or more objects failed to apply, reason: {}",
        failures.join("; ")
    );
    OperationState::failed(mask_message(&message, resources, rules))
}
