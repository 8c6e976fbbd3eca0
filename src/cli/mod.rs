//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the redactor using
//! clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// PHI Redactor - detect and redact protected health information
#[derive(Parser, Debug)]
#[command(name = "phi-redactor")]
#[command(version, about, long_about = None)]
#[command(author = "PHI Redactor Contributors")]
pub struct Cli {
    /// Path to configuration file (defaults apply when it does not exist)
    #[arg(short, long, default_value = "phi-redactor.toml", env = "PHI_REDACTOR_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PHI_REDACTOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redact a PDF, image or text file
    Redact(commands::redact::RedactArgs),

    /// List PHI found in a text file without writing anything
    Detect(commands::detect::DetectArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
