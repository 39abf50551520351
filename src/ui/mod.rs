//! Terminal user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] writing payload to stdout and status to stderr
//! - [`MockUI`] capturing output for tests
//!
//! # Example
//!
//! ```
//! use kubemask::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("kind: Secret");
//! ui.success("Rendered 1 manifest");
//!
//! assert!(ui.has_message("kind: Secret"));
//! assert!(ui.has_success("Rendered"));
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, KubemaskTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Set the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Write command payload. Shown in every mode.
    fn message(&mut self, msg: &str);

    /// Write diff text, styled per line.
    fn diff(&mut self, text: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Display a detail line (verbose mode only).
    fn detail(&mut self, msg: &str);
}
