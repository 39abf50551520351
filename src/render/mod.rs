//! Render pipeline hooks.
//!
//! Each hook funnels resources through the same classify and redact path
//! before anything is formatted:
//!
//! - [`render_manifests`] - Manifest listing
//! - [`render_diff`] - Live/target diff
//! - [`mask_message`] / [`validate_operation`] - Operation status messages

pub mod diff;
pub mod manifest;
pub mod status;

pub use diff::{render_diff, DiffRenderer, DiffReport, LineDiff, SENSITIVE_ONLY_NOTE};
pub use manifest::render_manifests;
pub use status::{mask_message, validate_operation, MaskedMessage, OperationPhase, OperationState};

/// Serialization used for manifest listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}
