//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for fsbq using clap.

pub mod commands;

use crate::domain::ExporterError;
use clap::{Parser, Subcommand};

/// Exit code for success
pub const EXIT_OK: i32 = 0;
/// Exit code for a pipeline failure (terminal export state, timeout, partial import)
pub const EXIT_PIPELINE_FAILURE: i32 = 1;
/// Exit code for a configuration error
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for malformed input
pub const EXIT_MALFORMED: i32 = 3;
/// Exit code for an upstream or connection error
pub const EXIT_UPSTREAM: i32 = 4;
/// Exit code for anything else
pub const EXIT_FATAL: i32 = 5;

/// fsbq - Firestore to BigQuery export pipeline
#[derive(Parser, Debug)]
#[command(name = "fsbq")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, env = "FSBQ_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "FSBQ_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log exports, publishes and load jobs instead of issuing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a Firestore export and enqueue the first status check
    Trigger(commands::trigger::TriggerArgs),

    /// Handle one status-check message
    CheckStatus(commands::check_status::CheckStatusArgs),

    /// Show the current state of an export operation
    Status(commands::status::StatusArgs),

    /// Validate configuration
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

/// Maps a pipeline error onto the process exit code
pub fn exit_code_for(error: &ExporterError) -> i32 {
    match error {
        ExporterError::Configuration(_) => EXIT_CONFIG,
        ExporterError::MalformedMessage(_)
        | ExporterError::MalformedStatus { .. }
        | ExporterError::Validation(_) => EXIT_MALFORMED,
        ExporterError::Upstream { .. } => EXIT_UPSTREAM,
        ExporterError::PartialImportFailure { .. } => EXIT_PIPELINE_FAILURE,
        ExporterError::Serialization(_) | ExporterError::Io(_) => EXIT_FATAL,
    }
}
