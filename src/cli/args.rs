//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kubemask - Render Kubernetes manifests with sensitive values masked.
#[derive(Debug, Parser)]
#[command(name = "kubemask")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides default .kubemask/settings.yml)
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Comma-separated annotation keys to mask (overrides settings files)
    #[arg(
        long,
        global = true,
        env = "KUBEMASK_SENSITIVE_ANNOTATIONS",
        value_name = "KEYS"
    )]
    pub mask_annotations: Option<String>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print manifests with sensitive values masked
    Manifests(ManifestsArgs),

    /// Show a masked diff between live and target manifests
    Diff(DiffArgs),

    /// Validate manifests and record the operation state
    Validate(ValidateArgs),

    /// Show the effective masking rules
    Rules(RulesArgs),
}

/// Arguments for the `manifests` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ManifestsArgs {
    /// Manifest files (YAML or JSON, multi-document)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `diff` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DiffArgs {
    /// Manifests currently in the cluster
    #[arg(long)]
    pub live: PathBuf,

    /// Desired manifests
    #[arg(long)]
    pub target: PathBuf,

    /// Lines of context around each change
    #[arg(long, default_value_t = 3)]
    pub context: usize,
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ValidateArgs {
    /// Manifest files to validate
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Live manifests whose values must also be kept out of messages
    #[arg(long)]
    pub live: Option<PathBuf>,

    /// Write the operation state as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub status_file: Option<PathBuf>,
}

/// Arguments for the `rules` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RulesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
