//! Command-line interface parsing for parkscout
//!
//! This module handles parsing of CLI arguments using clap, including the
//! cache-file override and the optional initial state name.

use clap::Parser;
use std::path::PathBuf;

/// Parkscout - browse US national park sites and nearby places
#[derive(Parser, Debug)]
#[command(name = "parkscout")]
#[command(about = "Browse US national park sites by state, with cached fetching")]
#[command(version)]
pub struct Cli {
    /// Path of the cache file (defaults to the XDG cache directory)
    ///
    /// All fetched pages and API responses are stored here keyed by URL;
    /// delete the file to force re-fetching.
    #[arg(long, value_name = "PATH")]
    pub cache: Option<PathBuf>,

    /// List this state's sites immediately instead of prompting first
    #[arg(long, value_name = "STATE")]
    pub state: Option<String>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Cache file override, if specified
    pub cache_path: Option<PathBuf>,
    /// State name to list before the first prompt, lowercased
    pub initial_state: Option<String>,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            cache_path: cli.cache.clone(),
            initial_state: cli.state.as_ref().map(|s| s.to_lowercase()),
        }
    }
}
