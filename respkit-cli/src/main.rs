//! respkit-cli - Offline inspector for RESP2 byte streams.
//!
//! Decodes captured protocol bytes from a file or stdin and renders each
//! value tree, or validates a stream and reports where it breaks.

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "respkit-cli")]
#[command(about = "Inspector for RESP2 protocol streams")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a stream and pretty-print each value
    Dump {
        /// Input file (stdin when omitted or "-")
        file: Option<PathBuf>,

        /// Prefix each value with its byte offset and encoded size
        #[arg(long)]
        offsets: bool,
    },

    /// Validate a stream without printing values
    Check {
        /// Input file (stdin when omitted or "-")
        file: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match commands::execute(cli.command) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red(), e);
            std::process::exit(1);
        }
    }

    Ok(())
}
