//! Visual theme and styling.

use console::Style;

/// Kubemask's visual theme.
#[derive(Debug, Clone)]
pub struct KubemaskTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
    /// Style for added diff lines (green).
    pub added: Style,
    /// Style for removed diff lines (red).
    pub removed: Style,
    /// Style for diff hunk markers (magenta).
    pub hunk: Style,
}

impl Default for KubemaskTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl KubemaskTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().bold().magenta(),
            added: Style::new().green(),
            removed: Style::new().red(),
            hunk: Style::new().magenta(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            header: Style::new(),
            added: Style::new(),
            removed: Style::new(),
            hunk: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header line.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    /// Style one line of diff output by its prefix.
    pub fn format_diff_line(&self, line: &str) -> String {
        let style = if line.starts_with("=====") {
            &self.header
        } else if line.starts_with("@@") {
            &self.hunk
        } else if line.starts_with("+++") || line.starts_with("---") {
            &self.dim
        } else if line.starts_with('+') {
            &self.added
        } else if line.starts_with('-') {
            &self.removed
        } else {
            return line.to_string();
        };
        format!("{}", style.apply_to(line))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
