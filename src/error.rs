// src/error.rs
// =============================================================================
// Error types for the library side of link-status.
//
// Two families:
// - CheckError: things that stop a whole batch (bad config, no HTTP client,
//   cancellation). A single unreachable URL is NEVER one of these, it is an
//   Outcome value (see checker/outcome.rs).
// - InputError: problems with the uploaded files, caught before any
//   checking starts.
//
// The binary wraps both in anyhow::Error with `?`.
// =============================================================================

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that fail a whole batch.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The configuration was rejected by `CheckerConfig::validate`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The shared HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The batch was cancelled (by the caller or the batch deadline)
    /// before every probe resolved.
    #[error("batch aborted after {completed} of {total} probes")]
    BatchAborted { completed: usize, total: usize },
}

/// Errors in the uploaded input, raised before the checker runs.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("No file uploaded")]
    NoFiles,

    #[error("No selected file")]
    NoSelectedFile,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8 text", path.display())]
    NotUtf8 { path: PathBuf },
}
