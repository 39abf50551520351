//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which loads the
//! masking rules once and routes CLI subcommands to their implementations.
//! Every command renders through the masking pipeline; none of them prints
//! a parsed resource directly.

pub mod diff;
pub mod dispatcher;
pub mod manifests;
pub mod rules;
pub mod validate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use std::path::PathBuf;

use crate::error::Result;
use crate::resource::{load_resource_file, Resource};

/// Load every document from `files`, in order.
fn load_all(files: &[PathBuf]) -> Result<Vec<Resource>> {
    let mut resources = Vec::new();
    for file in files {
        let loaded = load_resource_file(file)?;
        tracing::debug!("Loaded {} resources from {}", loaded.len(), file.display());
        resources.extend(loaded);
    }
    Ok(resources)
}
