//! Error types for kubemask operations.
//!
//! This module defines [`MaskError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `MaskError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `MaskError::Other`) for unexpected errors
//! - No variant ever carries resource content: parse failures report a
//!   location, never the parser's own message (which may quote values)

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for kubemask operations.
#[derive(Debug, Error)]
pub enum MaskError {
    /// Settings file not found at expected location.
    #[error("Settings not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse settings file.
    #[error("Failed to parse settings at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// A masking rule in the settings could not be accepted.
    #[error("Invalid masking rule '{setting}': {message}")]
    InvalidMaskRule { setting: String, message: String },

    /// A resource document could not be parsed.
    ///
    /// Only the location is reported; the parser's message is dropped
    /// because it may quote the offending value.
    #[error("Failed to parse resources in {source_name}{}", format_location(.line, .column))]
    ResourceParseError {
        source_name: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// Rendering a masked resource failed.
    #[error("Failed to render {what}: {message}")]
    RenderError { what: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_location(line: &Option<usize>, column: &Option<usize>) -> String {
    match (*line, *column) {
        (Some(line), Some(column)) => format!(" at line {} column {}", line, column),
        (Some(line), None) => format!(" at line {}", line),
        _ => String::new(),
    }
}

/// Result type alias for kubemask operations.
pub type Result<T> = std::result::Result<T, MaskError>;
