//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// feedcal - follow a remote ICS calendar feed
#[derive(Debug, Parser)]
#[command(name = "feedcal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "FEEDCAL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Relay proxy endpoint (overrides [relay] base_url)
    #[arg(long, env = "FEEDCAL_RELAY_URL", global = true)]
    pub relay_url: Option<String>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    /// Output events as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the feed once and print its events
    Fetch {
        /// Feed URL (http, https or webcal); defaults to [feed] url
        url: Option<String>,

        /// Read a local .ics file instead of going through the relay
        #[arg(long, conflicts_with = "url")]
        file: Option<PathBuf>,
    },

    /// Subscribe to the feed and report every poll until interrupted
    Watch {
        /// Feed URL (http, https or webcal); defaults to [feed] url
        url: Option<String>,

        /// Poll interval in seconds (overrides [poll] interval_secs)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}
