// src/checker/outcome.rs
// =============================================================================
// What a single probe produces.
//
// Every way a request can end maps to exactly one Outcome variant:
// - the server answered            -> StatusCode(n), whatever n is
// - the deadline passed            -> Timeout
// - anything else went wrong       -> NetworkError(detail)
//
// Outcomes are plain values. Nothing in the checker turns a per-URL failure
// into an Err, so one dead server can never take the batch down with it.
// =============================================================================

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server answered with this HTTP status code.
    StatusCode(u16),
    /// The probe did not finish before its deadline.
    Timeout,
    /// Connection refused, DNS failure, TLS failure, malformed response...
    NetworkError(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::StatusCode(code) => write!(f, "HTTP {}", code),
            Outcome::Timeout => write!(f, "timed out"),
            Outcome::NetworkError(detail) => write!(f, "network error: {}", detail),
        }
    }
}

/// One URL and how its probe ended. Created once per URL per batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub url: String,
    pub outcome: Outcome,
}

impl ProbeResult {
    pub fn new(url: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            url: url.into(),
            outcome,
        }
    }
}
