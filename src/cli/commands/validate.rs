//! Validate command implementation.
//!
//! The `kubemask validate` command checks manifests the way an apply would
//! and records the outcome as an operation state whose message is masked.

use std::fs;

use crate::cli::args::ValidateArgs;
use crate::error::{MaskError, Result};
use crate::render::{validate_operation, OperationState};
use crate::resource::load_resource_file;
use crate::rules::RuleStore;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::load_all;

/// The validate command implementation.
pub struct ValidateCommand<'a> {
    store: &'a RuleStore,
    args: ValidateArgs,
}

impl<'a> ValidateCommand<'a> {
    /// Create a new validate command.
    pub fn new(store: &'a RuleStore, args: ValidateArgs) -> Self {
        Self { store, args }
    }

    fn write_state(&self, state: &OperationState, ui: &mut dyn UserInterface) -> Result<()> {
        let Some(path) = &self.args.status_file else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(state).map_err(|e| MaskError::RenderError {
            what: "operation state".to_string(),
            message: e.to_string(),
        })?;
        fs::write(path, format!("{}\n", json))?;
        ui.detail(&format!("Wrote operation state to {}", path.display()));
        Ok(())
    }
}

impl Command for ValidateCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let target = load_all(&self.args.files)?;
        let live = match &self.args.live {
            Some(path) => load_resource_file(path)?,
            None => Vec::new(),
        };

        let state = validate_operation(&target, &live, &self.store.snapshot());
        self.write_state(&state, ui)?;

        if state.is_failed() {
            ui.error(state.message.as_str());
            Ok(CommandResult::failure(1))
        } else {
            ui.success(state.message.as_str());
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;
    use crate::ui::MockUI;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const INVALID: &str = r#"apiVersion: v1
kind: Secret
metadata:
  name: secret
data:
  password: 12345
"#;

    fn write(temp: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = temp.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn invalid_secret_fails_with_masked_message() {
        let temp = TempDir::new().unwrap();
        let status = temp.path().join("state.json");
        let args = ValidateArgs {
            files: vec![write(&temp, "secret.yaml", INVALID)],
            live: None,
            status_file: Some(status.clone()),
        };
        let store = RuleStore::new(RuleSet::new());
        let mut ui = MockUI::new();

        let result = ValidateCommand::new(&store, args).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Secret \"secret\" is invalid"));
        assert!(!ui.all_output().contains("12345"));

        let state = fs::read_to_string(status).unwrap();
        assert!(state.contains("\"phase\": \"Failed\""));
        assert!(!state.contains("12345"));
    }

    #[test]
    fn valid_manifests_succeed() {
        let temp = TempDir::new().unwrap();
        let args = ValidateArgs {
            files: vec![write(
                &temp,
                "cm.yaml",
                "apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: cm\n",
            )],
            live: None,
            status_file: None,
        };
        let store = RuleStore::default();
        let mut ui = MockUI::new();

        let result = ValidateCommand::new(&store, args).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_success("successfully validated 1 resources"));
    }
}
