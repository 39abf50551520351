//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for loading rules and routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_settings, SettingsPaths};
use crate::error::{MaskError, Result};
use crate::rules::RuleStore;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    settings_path: Option<PathBuf>,
    annotation_override: Option<String>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            settings_path: None,
            annotation_override: None,
        }
    }

    /// Load only this settings file instead of discovering them.
    pub fn with_settings_path(mut self, path: Option<PathBuf>) -> Self {
        self.settings_path = path;
        self
    }

    /// Replace the sensitive annotation list from settings files.
    pub fn with_annotation_override(mut self, keys: Option<String>) -> Self {
        self.annotation_override = keys;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Build the rule store from settings and overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file can't be read or parsed, or if
    /// the rules it describes are invalid.
    pub fn rule_store(&self, ui: &mut dyn UserInterface) -> Result<RuleStore> {
        match &self.settings_path {
            Some(path) => ui.detail(&format!("# {}", path.display())),
            None => {
                for path in SettingsPaths::discover(&self.project_root).all_existing() {
                    ui.detail(&format!("# {}", path.display()));
                }
            }
        }

        let mut settings = load_settings(&self.project_root, self.settings_path.as_deref())?;
        if let Some(keys) = &self.annotation_override {
            tracing::debug!("Sensitive annotations overridden from command line or environment");
            settings.set_sensitive_annotations(keys.clone());
        }

        RuleStore::from_settings(&settings)
    }

    /// Dispatch and execute a command.
    ///
    /// Loads the masking rules once, then routes the CLI subcommand to the
    /// appropriate command implementation.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let store = match self.rule_store(ui) {
            Ok(store) => store,
            Err(e @ (MaskError::InvalidMaskRule { .. } | MaskError::ConfigParseError { .. })) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        match &cli.command {
            Commands::Manifests(args) => {
                let cmd = super::manifests::ManifestsCommand::new(&store, args.clone());
                cmd.execute(ui)
            }
            Commands::Diff(args) => {
                let cmd = super::diff::DiffCommand::new(&store, args.clone());
                cmd.execute(ui)
            }
            Commands::Validate(args) => {
                let cmd = super::validate::ValidateCommand::new(&store, args.clone());
                cmd.execute(ui)
            }
            Commands::Rules(args) => {
                let cmd = super::rules::RulesCommand::new(&store, args.clone());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    fn project_with_settings(settings: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".kubemask");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("settings.yml"), settings).unwrap();
        temp
    }

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn rule_store_without_settings_uses_builtins() {
        let temp = TempDir::new().unwrap();
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let mut ui = MockUI::new();

        let store = dispatcher.rule_store(&mut ui).unwrap();
        assert!(store.snapshot().sensitive_annotation_keys().is_empty());
    }

    #[test]
    fn rule_store_reads_settings() {
        let temp = project_with_settings("data:\n  resource.sensitive.mask.annotations: token\n");
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        let store = dispatcher.rule_store(&mut ui).unwrap();

        assert!(store.snapshot().is_sensitive_annotation("token"));
        assert!(ui.details().iter().any(|d| d.contains("settings.yml")));
    }

    #[test]
    fn annotation_override_replaces_settings() {
        let temp = project_with_settings("data:\n  resource.sensitive.mask.annotations: token\n");
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf())
            .with_annotation_override(Some("other".to_string()));
        let mut ui = MockUI::new();

        let rules = dispatcher.rule_store(&mut ui).unwrap().snapshot();

        assert!(rules.is_sensitive_annotation("other"));
        assert!(!rules.is_sensitive_annotation("token"));
    }

    #[test]
    fn invalid_rules_fail_with_exit_code_two() {
        let temp =
            project_with_settings("data:\n  resource.sensitive.mask.annotations: \"bad key!\"\n");
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf());
        let cli = <Cli as clap::Parser>::try_parse_from(["kubemask", "rules"]).unwrap();
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_error("resource.sensitive.mask.annotations"));
    }
}
