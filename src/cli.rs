// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes. Every checker tunable can also be set from a
// LINK_STATUS_* environment variable (clap's `env` feature).
// =============================================================================

use clap::{Args, Parser, Subcommand};
use link_status::config::DEFAULT_CONCURRENCY;
use link_status::CheckerConfig;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "link-status",
    version,
    about = "Extract URLs from text files and report the HTTP status of each one",
    long_about = "link-status pulls every http://, https:// and www. URL out of the given files, \
                  checks each distinct URL once, and sorts them into 200 / 301_302 / 403 / 404 / \
                  500+ / error buckets."
)]
pub struct Cli {
    /// Log progress to stderr (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract URLs from files and check their HTTP status
    ///
    /// Example: link-status check notes.txt bookmarks.html --csv
    Check {
        /// Text files to scan for URLs
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print the full JSON document (urls, unique_urls, status_results, csv_data, json_data)
        #[arg(long, conflicts_with = "csv")]
        json: bool,

        /// Print the report as CSV (URL,Status)
        #[arg(long)]
        csv: bool,

        #[command(flatten)]
        checker: CheckerArgs,
    },

    /// Only list the distinct URLs found, without checking them
    Extract {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct CheckerArgs {
    /// Maximum number of requests in flight at once
    #[arg(long, env = "LINK_STATUS_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY as u64,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub concurrency: u64,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "LINK_STATUS_TIMEOUT_MS", default_value_t = 5000,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: u64,

    /// Give up on the whole batch after this many seconds
    #[arg(long, env = "LINK_STATUS_BATCH_TIMEOUT_SECS",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_timeout_secs: Option<u64>,

    /// Report 301/302 answers as-is instead of following them
    #[arg(long, env = "LINK_STATUS_NO_FOLLOW_REDIRECTS")]
    pub no_follow_redirects: bool,
}

impl CheckerArgs {
    pub fn to_config(&self) -> CheckerConfig {
        CheckerConfig {
            concurrency: self.concurrency as usize,
            request_timeout: Duration::from_millis(self.timeout_ms),
            follow_redirects: !self.no_follow_redirects,
            batch_timeout: self.batch_timeout_secs.map(Duration::from_secs),
            ..CheckerConfig::default()
        }
    }
}
