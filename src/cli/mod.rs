//! CLI module for ministack.
//!
//! Provides argument parsing and the subcommand implementations. The CLI
//! surface is deliberately small: resolve parameters, declare the stack,
//! emit the declared tree. Deploy, diff, and destroy belong to the external
//! provisioning tooling.

pub mod commands;

use crate::stack::StackVariant;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Ministack - a minimalist stack declaration tool
///
/// Declares a parameterized VPC + EC2 (+ optional RDS PostgreSQL) stack as
/// a resource-intent tree for an external provisioning engine.
#[derive(Parser, Debug, Clone)]
#[command(name = "ministack")]
#[command(author = "Ministack Contributors")]
#[command(version)]
#[command(about = "A minimalist stack declaration tool", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Context overrides (key=value), applied over the context file
    #[arg(short = 'c', long = "context", global = true, action = clap::ArgAction::Append)]
    pub context: Vec<String>,

    /// Path to a JSON context file
    #[arg(long = "context-file", global = true, env = "MINISTACK_CONTEXT_FILE")]
    pub context_file: Option<PathBuf>,

    /// Stack variant to declare
    #[arg(long, global = true, value_enum, default_value_t = StackVariant::default())]
    pub variant: StackVariant,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short = 'v', long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub output: OutputFormat,
}

impl Cli {
    /// Parses command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the effective verbosity level.
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

/// Output format for emitted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve parameters, declare the stack, and emit the intent tree
    Synth,
    /// Print the resolved configuration without declaring anything
    Config,
    /// List the available stack variants
    Variants,
}
