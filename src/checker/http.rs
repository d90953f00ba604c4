// src/checker/http.rs
// =============================================================================
// The prober: one GET request against one URL, turned into an Outcome.
//
// Key functionality:
// - Makes a single HTTP GET request (no retries, a failure is final)
// - Bounded by a per-request timeout
// - Maps every way the request can end to exactly one Outcome variant
// - Shares one reqwest Client (and its connection pool) across all probes
//
// Rust concepts:
// - Traits: the Probe trait lets the dispatcher run fake probers in tests
// - async/await: the probe suspends while waiting on the network
// - tokio::time::timeout: a hard deadline around the whole request
// =============================================================================

use super::outcome::Outcome;
use crate::config::{CheckerConfig, MAX_REDIRECTS};
use crate::error::CheckError;
use async_trait::async_trait;
use reqwest::{redirect, Client};
use std::error::Error as _;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Anything that can check one URL.
///
/// Implementations must not fail: every problem becomes an `Outcome`.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, url: &str) -> Outcome;
}

/// The real prober, backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: Client,
    timeout: Duration,
}

impl HttpProber {
    // Builds the client once; every probe of the batch clones a handle to it.
    // Client is cheap to clone (it's just a reference counter internally).
    pub fn new(config: &CheckerConfig) -> Result<Self, CheckError> {
        let policy = if config.follow_redirects {
            redirect::Policy::limited(MAX_REDIRECTS)
        } else {
            // Hand the 3xx back so it lands in the "301_302" bucket
            redirect::Policy::none()
        };

        let client = Client::builder()
            .timeout(config.request_timeout)
            .redirect(policy)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(CheckError::ClientBuild)?;

        Ok(Self {
            client,
            timeout: config.request_timeout,
        })
    }
}

#[async_trait]
impl Probe for HttpProber {
    async fn probe(&self, url: &str) -> Outcome {
        // Tokens like "www.example.com" have no scheme; report them here
        // instead of sending reqwest something it can't build a request from.
        if let Err(e) = Url::parse(url) {
            return Outcome::NetworkError(format!("invalid URL: {}", e));
        }

        // reqwest has its own timeout too; this outer one also bounds
        // anything that happens before the request is handed to the pool.
        let outcome = match tokio::time::timeout(self.timeout, self.client.get(url).send()).await
        {
            Err(_elapsed) => Outcome::Timeout,
            Ok(Ok(response)) => Outcome::StatusCode(response.status().as_u16()),
            Ok(Err(e)) => categorize_error(&e),
        };

        debug!(url, %outcome, "probe finished");
        outcome
    }
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
// - etc.
fn categorize_error(error: &reqwest::Error) -> Outcome {
    if error.is_timeout() {
        return Outcome::Timeout;
    }

    let cause = root_cause(error);
    let lowered = cause.to_lowercase();

    let detail = if error.is_redirect() {
        "too many redirects".to_string()
    } else if lowered.contains("dns") || lowered.contains("resolve") {
        format!("could not resolve hostname: {}", cause)
    } else if lowered.contains("certificate") || lowered.contains("tls") || lowered.contains("ssl") {
        format!("TLS error: {}", cause)
    } else if error.is_connect() {
        format!("connection failed: {}", cause)
    } else if error.is_builder() {
        format!("invalid request: {}", cause)
    } else {
        cause
    };

    Outcome::NetworkError(detail)
}

// reqwest's own message is usually "error sending request for url (...)";
// the interesting part is at the bottom of the source chain.
fn root_cause(error: &reqwest::Error) -> String {
    let mut cause: &dyn std::error::Error = error;
    while let Some(next) = cause.source() {
        cause = next;
    }
    cause.to_string()
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why Result<Outcome, _> is NOT the return type of probe()
//    - A batch must finish even if half the servers are down
//    - So "the server is down" is data, not an error
//    - The only errors in this file are about building the client itself
//
// 2. Why #[async_trait]?
//    - The dispatcher holds the prober as Arc<dyn Probe>
//    - async fn in a trait used through `dyn` still needs the macro,
//      which boxes the returned future
// -----------------------------------------------------------------------------
