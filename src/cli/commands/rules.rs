//! Rules command implementation.
//!
//! The `kubemask rules` command shows the effective masking rules.

use crate::cli::args::RulesArgs;
use crate::error::{MaskError, Result};
use crate::resource::GroupKind;
use crate::rules::{PlaceholderStyle, RuleStore};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The rules command implementation.
pub struct RulesCommand<'a> {
    store: &'a RuleStore,
    args: RulesArgs,
}

impl<'a> RulesCommand<'a> {
    /// Create a new rules command.
    pub fn new(store: &'a RuleStore, args: RulesArgs) -> Self {
        Self { store, args }
    }
}

impl Command for RulesCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let summary = self.store.snapshot().summary();

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&summary).map_err(|e| MaskError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.message("Always-sensitive kinds:");
        for rule in &summary.always_sensitive {
            let gk = GroupKind::new(rule.group.as_str(), rule.kind.as_str());
            ui.message(&format!("  {}: {}", gk, rule.fields.join(", ")));
        }

        ui.message("Sensitive annotations:");
        if summary.annotations.is_empty() {
            ui.message("  (none)");
        }
        for key in &summary.annotations {
            ui.message(&format!("  {}", key));
        }

        let style = match summary.placeholder_style {
            PlaceholderStyle::Uniform => "uniform",
            PlaceholderStyle::MarkChanged => "mark changed",
        };
        ui.message(&format!("Diff placeholder: {}", style));

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;
    use crate::ui::MockUI;

    #[test]
    fn lists_builtins_and_annotations() {
        let store = RuleStore::new(RuleSet::with_annotation_keys(["token"]));
        let mut ui = MockUI::new();

        RulesCommand::new(&store, RulesArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message("  Secret: data, stringData"));
        assert!(ui.has_message("  token"));
        assert!(ui.has_message("Diff placeholder: uniform"));
    }

    #[test]
    fn shows_none_without_annotations() {
        let store = RuleStore::default();
        let mut ui = MockUI::new();

        RulesCommand::new(&store, RulesArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message("(none)"));
    }

    #[test]
    fn json_output() {
        let store = RuleStore::new(
            RuleSet::with_annotation_keys(["token"])
                .with_placeholder_style(PlaceholderStyle::MarkChanged),
        );
        let mut ui = MockUI::new();

        RulesCommand::new(&store, RulesArgs { json: true })
            .execute(&mut ui)
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(parsed["annotations"][0], "token");
        assert_eq!(parsed["placeholderStyle"], "markChanged");
        assert_eq!(parsed["alwaysSensitive"][0]["kind"], "Secret");
    }
}
