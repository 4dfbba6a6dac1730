//! CLI argument definitions using clap
//!
//! Commands:
//! - expedientes init --config <path>
//! - expedientes seed --config <path>
//! - expedientes list --config <path>
//! - expedientes get --config <path> --id <id>
//! - expedientes create --config <path>            (record JSON on stdin)
//! - expedientes update --config <path> --id <id>  (patch JSON on stdin)
//! - expedientes delete --config <path> --id <id>
//! - expedientes query --config <path>             (query JSON on stdin)

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Municipal case-record store and query engine
#[derive(Parser, Debug)]
#[command(name = "expedientes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory and an empty store
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./expedientes.json")]
        config: PathBuf,
    },

    /// Insert the sample records if the store is empty
    Seed {
        /// Path to configuration file
        #[arg(long, default_value = "./expedientes.json")]
        config: PathBuf,
    },

    /// Print every stored record
    List {
        /// Path to configuration file
        #[arg(long, default_value = "./expedientes.json")]
        config: PathBuf,
    },

    /// Print one record
    Get {
        /// Path to configuration file
        #[arg(long, default_value = "./expedientes.json")]
        config: PathBuf,
        /// Record id
        #[arg(long)]
        id: String,
    },

    /// Create a record from a JSON object on stdin
    Create {
        /// Path to configuration file
        #[arg(long, default_value = "./expedientes.json")]
        config: PathBuf,
    },

    /// Merge a JSON patch from stdin into a record
    Update {
        /// Path to configuration file
        #[arg(long, default_value = "./expedientes.json")]
        config: PathBuf,
        /// Record id
        #[arg(long)]
        id: String,
    },

    /// Delete a record
    Delete {
        /// Path to configuration file
        #[arg(long, default_value = "./expedientes.json")]
        config: PathBuf,
        /// Record id
        #[arg(long)]
        id: String,
    },

    /// Run a query read from stdin (empty input = default query)
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./expedientes.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
