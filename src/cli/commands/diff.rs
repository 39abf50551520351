//! Diff command implementation.
//!
//! The `kubemask diff` command compares live and target manifests with
//! sensitive values masked on both sides. Exits 1 when they differ.

use crate::cli::args::DiffArgs;
use crate::error::Result;
use crate::render::{render_diff, LineDiff};
use crate::resource::load_resource_file;
use crate::rules::RuleStore;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The diff command implementation.
pub struct DiffCommand<'a> {
    store: &'a RuleStore,
    args: DiffArgs,
}

impl<'a> DiffCommand<'a> {
    /// Create a new diff command.
    pub fn new(store: &'a RuleStore, args: DiffArgs) -> Self {
        Self { store, args }
    }
}

impl Command for DiffCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let live = load_resource_file(&self.args.live)?;
        let target = load_resource_file(&self.args.target)?;

        let renderer = LineDiff {
            context: self.args.context,
        };
        let report = render_diff(&live, &target, self.store, &renderer)?;

        if report.has_changes() {
            ui.diff(&report.text);
            ui.warning(&format!("{} resources differ", report.changed));
            Ok(CommandResult::failure(1))
        } else {
            ui.success("No differences");
            Ok(CommandResult::success())
        }
    }
}
