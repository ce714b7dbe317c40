//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `run`: Sync once (the build-start trigger)
//! - `watch`: Sync once, then again on every locale file change
//! - `init`: Write a default `.glotsyncrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }
}

/// Common arguments shared by `run` and `watch`.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project root (locale folder is resolved against it)
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Locale folder relative to the root (overrides config file)
    #[arg(long)]
    pub folder: Option<String>,

    /// Source-of-truth locale (overrides config file)
    #[arg(long)]
    pub default_locale: Option<String>,

    /// Comma-separated locales (overrides config file)
    #[arg(long, value_delimiter = ',')]
    pub locales: Vec<String>,

    /// Translation API project id (overrides config file)
    #[arg(long, env = "GLOTSYNC_PROJECT_ID")]
    pub project_id: Option<String>,

    /// OAuth access token for the translation API
    #[arg(long, env = "GLOTSYNC_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Show changed keys without translating or writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Quiet period before re-syncing after a change
    #[arg(long, default_value_t = 300)]
    pub debounce_ms: u64,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate keys that changed since the last run
    Run(RunArgs),
    /// Run once, then re-run whenever a locale file changes
    Watch(WatchArgs),
    /// Initialize a new .glotsyncrc.json configuration file
    Init,
}
