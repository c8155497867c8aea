//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--json, --verbose, --config) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Siteship - publish a static site with cache-tiered uploads
#[derive(Parser, Debug)]
#[command(name = "siteship")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ./siteship.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the deployment plan for the content root
    Plan {
        /// Build output directory
        #[arg(long, value_name = "DIR")]
        content_root: Option<PathBuf>,
    },

    /// Upload the content root to the destination store
    Deploy {
        /// Build output directory
        #[arg(long, value_name = "DIR")]
        content_root: Option<PathBuf>,

        /// Object store root directory
        #[arg(long, value_name = "DIR")]
        destination: Option<PathBuf>,

        /// Plan and sequence without touching the destination
        #[arg(long)]
        dry_run: bool,

        /// Run tier units one after another
        #[arg(long)]
        sequential: bool,
    },

    /// Resolve viewer request URIs the way the edge function does
    Rewrite {
        /// URIs to rewrite
        uris: Vec<String>,

        /// Read a JSON edge event from stdin instead
        #[arg(long, conflicts_with = "uris")]
        event: bool,
    },
}
