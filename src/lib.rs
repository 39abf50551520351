//! Kubemask - Presentation-time redaction for Kubernetes-style resources.
//!
//! Kubemask produces redacted copies of resources wherever their content is
//! about to be shown to a human: manifest listings, diffs and operation
//! status messages. The original resources are never modified.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings loading and layering
//! - [`error`] - Error types and result aliases
//! - [`masking`] - Sensitivity classification, redaction and text scrubbing
//! - [`render`] - Manifest, diff and status hooks
//! - [`resource`] - Resource documents, parsing and validation
//! - [`rules`] - Masking rules and the shared rule store
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use kubemask::render::{render_manifests, OutputFormat};
//! use kubemask::resource::parse_resources;
//! use kubemask::rules::{RuleSet, RuleStore};
//!
//! let yaml = r#"
//! apiVersion: v1
//! kind: Secret
//! metadata:
//!   name: db
//!   annotations:
//!     token: SECRETVAL
//! data:
//!   password: U0VDUkVUVkFM
//! "#;
//!
//! let resources = parse_resources(yaml, "db.yaml").unwrap();
//! let store = RuleStore::new(RuleSet::with_annotation_keys(["token"]));
//!
//! let output = render_manifests(&resources, &store, OutputFormat::Yaml).unwrap();
//! assert!(!output.contains("SECRETVAL"));
//! assert!(!output.contains("U0VDUkVUVkFM"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod masking;
pub mod render;
pub mod resource;
pub mod rules;
pub mod ui;

pub use error::{MaskError, Result};
