//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::state::STATE_FILE;

/// attrplan - Reconcile computed attributes between recorded state and plans.
#[derive(Parser, Debug)]
#[command(name = "attrplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the schema file.
    #[arg(short, long, global = true, env = "ATTRPLAN_SCHEMA")]
    pub schema: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter schema file.
    Init {
        /// Directory to initialize (defaults to current directory).
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Force overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the schema.
    Validate {
        /// Show all warnings, not just errors.
        #[arg(short, long)]
        warnings: bool,
    },

    /// List the available plan modifiers.
    Rules,

    /// Apply plan modifiers to a tentative plan.
    Plan {
        /// Recorded state file.
        #[arg(long, default_value = STATE_FILE)]
        state: PathBuf,

        /// Tentative plan file.
        #[arg(long)]
        plan: PathBuf,

        /// Write the final plan to this file.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Show every attribute, not only changes.
        #[arg(short, long)]
        detailed: bool,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}
