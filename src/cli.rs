//! CLI definitions for pkgreg.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pkgreg CLI.
#[derive(Parser)]
#[command(name = "pkgreg")]
#[command(about = "Look up which configuration runs each registered server version")]
#[command(version)]
pub(crate) struct Cli {
    /// Package manifest path (default: ~/.pkgreg/packages.toml)
    #[arg(short, long, env = "PKGREG_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the configuration of the newest registered version (default)
    Newest,

    /// List registered versions and their configurations
    List {
        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Print the configuration registered for a version
    Get {
        /// Version identifier
        version: String,
    },

    /// Validate the manifest
    Check,
}
