//! # Sieve - Grain-Size Analysis
//!
//! The command-line binary for sieve-core.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              apps/sieve (THE BINARY)          │
//! │                                               │
//! │  ┌─────────────┐        ┌─────────────────┐   │
//! │  │   CLI       │ ─────► │  config (TOML)  │   │
//! │  │  (clap)     │        │  snapshot (JSON)│   │
//! │  └──────┬──────┘        └────────┬────────┘   │
//! │         └──────────────┬─────────┘            │
//! │                        ▼                      │
//! │                ┌───────────────┐              │
//! │                │  sieve-core   │              │
//! │                │ (THE LOGIC)   │              │
//! │                └───────────────┘              │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! sieve passing -f test.toml
//! sieve stack -f test.toml --json-mode
//! sieve export -f test.toml -o test.json
//! ```

use clap::Parser;
use sieve::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing — SIEVE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SIEVE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "sieve=debug"
    } else {
        "sieve=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  sieve v{}  -  grain-size analysis
"#,
        env!("CARGO_PKG_VERSION")
    );
}
