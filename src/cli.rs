//! Command-line interface definitions using clap
//!
//! With no subcommand the HTTP server is started.

use clap::{Parser, Subcommand};

/// tinylink - a small URL shortener
#[derive(Parser)]
#[command(name = "tinylink")]
#[command(version)]
#[command(about = "A small URL shortener backed by an embedded store", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Add a short link
    ///
    /// Usage: add [SHORT_CODE] <TARGET_URL>
    /// - If only URL provided, generates random short code
    /// - If both provided, uses (and overwrites) the specified short code
    Add {
        /// Positional args: [short_code] <target_url>
        #[arg(required = true, num_args = 1..=2)]
        args: Vec<String>,

        /// Expiry in minutes
        #[arg(long)]
        expiry: Option<String>,
    },

    /// Show the target of a short link
    Get {
        /// Short code to look up
        short_code: String,
    },

    /// Remove a short link
    Remove {
        /// Short code to remove
        short_code: String,
    },

    /// Purge expired links from the store
    Purge,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: stdout)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    /// Parse add command args into (short_code, target_url)
    pub fn parse_add_args(args: &[String]) -> (Option<String>, String) {
        match args {
            [url] => (None, url.clone()),
            [code, url] => (Some(code.clone()), url.clone()),
            _ => unreachable!("clap ensures 1-2 args"),
        }
    }
}
