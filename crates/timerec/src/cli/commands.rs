//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::config::Config;

/// Run command arguments.
#[derive(Debug, Default, Args)]
pub struct RunCommand {
    /// Maximum number of timers (overrides configuration)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub capacity: Option<u64>,

    /// Start with the watchdog disabled
    #[arg(long)]
    pub no_watchdog: bool,

    /// Seconds allowed between operator actions (overrides configuration)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub watchdog_timeout: Option<u64>,
}

impl RunCommand {
    /// Apply command-line overrides on top of loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(capacity) = self.capacity {
            config.store.capacity = usize::try_from(capacity).unwrap_or(usize::MAX);
        }
        if self.no_watchdog {
            config.watchdog.enabled = false;
        }
        if let Some(secs) = self.watchdog_timeout {
            config.watchdog.timeout_secs = secs;
        }
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
