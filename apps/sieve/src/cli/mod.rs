//! # Sieve CLI Module
//!
//! This module implements the CLI interface for the sieve binary.
//!
//! ## Available Commands
//!
//! - `passing` - Print the percent-passing table
//! - `stack` - List the sieves, their masses and the sample
//! - `export` - Write a JSON snapshot of the stack

mod commands;

use clap::{Parser, Subcommand};
use sieve_core::SieveError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Sieve - grain-size analysis
///
/// Reads a sieve test (TOML) or stack snapshot (JSON) and reports how much of
/// the sample passed each screen.
#[derive(Parser, Debug)]
#[command(name = "sieve")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the percent-passing table
    Passing {
        /// Path to the sieve test or snapshot
        #[arg(short, long)]
        file: PathBuf,

        /// Input format (toml, json); detected from the extension if omitted
        #[arg(short = 't', long)]
        format: Option<String>,
    },

    /// List the sieves in the stack
    Stack {
        /// Path to the sieve test or snapshot
        #[arg(short, long)]
        file: PathBuf,

        /// Input format (toml, json); detected from the extension if omitted
        #[arg(short = 't', long)]
        format: Option<String>,
    },

    /// Export the stack as a JSON snapshot
    Export {
        /// Path to the sieve test or snapshot
        #[arg(short, long)]
        file: PathBuf,

        /// Input format (toml, json); detected from the extension if omitted
        #[arg(short = 't', long)]
        format: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), SieveError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Passing { file, format } => cmd_passing(&file, format.as_deref(), json_mode),
        Commands::Stack { file, format } => cmd_stack(&file, format.as_deref(), json_mode),
        Commands::Export {
            file,
            format,
            output,
        } => cmd_export(&file, format.as_deref(), &output),
    }
}
