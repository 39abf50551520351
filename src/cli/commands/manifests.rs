//! Manifests command implementation.
//!
//! The `kubemask manifests` command prints manifests with sensitive values
//! masked.

use crate::cli::args::ManifestsArgs;
use crate::error::Result;
use crate::render::{render_manifests, OutputFormat};
use crate::rules::RuleStore;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::load_all;

/// The manifests command implementation.
pub struct ManifestsCommand<'a> {
    store: &'a RuleStore,
    args: ManifestsArgs,
}

impl<'a> ManifestsCommand<'a> {
    /// Create a new manifests command.
    pub fn new(store: &'a RuleStore, args: ManifestsArgs) -> Self {
        Self { store, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ManifestsArgs {
        &self.args
    }
}

impl Command for ManifestsCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resources = load_all(&self.args.files)?;

        let format = if self.args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Yaml
        };
        let output = render_manifests(&resources, self.store, format)?;

        if !output.is_empty() {
            ui.message(output.trim_end_matches('\n'));
        }
        ui.success(&format!("Rendered {} manifests", resources.len()));

        Ok(CommandResult::success())
    }
}
