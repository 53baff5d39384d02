//! Command-line arguments.

use clap::{Parser, Subcommand};

/// Per-person colour lists over HTTP.
#[derive(Parser, Debug)]
#[command(name = "swatch", author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path (defaults to `$SWATCH_CONFIG`, then the platform config dir)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (the default)
    Serve {
        /// Listen port, overriding config and environment
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Inspect or edit the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `swatch config ...`
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,
    /// Print a value by dotted key, e.g. `server.port`
    Get { key: String },
    /// Set a value by dotted key in the config file
    Set { key: String, value: String },
    /// Write a default config file
    Init {
        /// Where to write it (defaults to the resolved path)
        #[arg(short, long)]
        file: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
