//! Sensitivity classification and redaction.
//!
//! Every output path goes through the same two steps:
//!
//! 1. [`classify`] decides which paths of a resource are sensitive under a
//!    rule set snapshot.
//! 2. [`redact`] produces a [`MaskedResource`] with those paths replaced by
//!    [`PLACEHOLDER`].
//!
//! [`mask_resource`] runs both. [`MessageMasker`] scrubs free-form text that
//! may quote original values.
//!
//! # Example
//!
//! ```
//! use kubemask::masking::{mask_resource, PLACEHOLDER};
//! use kubemask::resource::Resource;
//! use kubemask::rules::RuleSet;
//! use serde_json::json;
//!
//! let secret = Resource::new(json!({
//!     "apiVersion": "v1",
//!     "kind": "Secret",
//!     "metadata": {"name": "db"},
//!     "stringData": {"username": "SECRETVAL"}
//! }));
//!
//! let masked = mask_resource(&secret, &RuleSet::new());
//! assert_eq!(masked.as_value()["stringData"]["username"], PLACEHOLDER);
//! assert_eq!(masked.as_value()["metadata"]["name"], "db");
//! ```

pub mod classify;
pub mod redact;
pub mod scrub;

pub use classify::{classify, FieldPath, SensitivityDecision};
pub use redact::{redact, redact_pair, MaskedResource};
pub use scrub::MessageMasker;

use crate::resource::Resource;
use crate::rules::RuleSet;

/// Replacement for every sensitive value. Fixed width, so it reveals
/// nothing about the original length.
pub const PLACEHOLDER: &str = "++++++++";

/// Target-side replacement for a sensitive value that differs from live.
pub const CHANGED_PLACEHOLDER: &str = "++++++++ (changed)";

/// Classify and redact one resource.
pub fn mask_resource(resource: &Resource, rules: &RuleSet) -> MaskedResource {
    let decision = classify(resource, rules);
    redact(resource, &decision)
}
