//! CLI module for the attrplan tool.
//!
//! This module provides the command-line interface for validating schemas
//! and running plan modifiers over tentative plans.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;
