// src/checker/mod.rs
// =============================================================================
// This module contains all URL status checking logic.
//
// Submodules:
// - outcome: what a single probe produces
// - http: the Probe trait and the reqwest-backed prober
// - dispatch: runs probes concurrently behind an admission gate
// - report: classifies outcomes into the six report buckets
//
// check_urls() below wires them together and is what front ends call.
// =============================================================================

mod dispatch;
mod http;
mod outcome;
mod report;

pub use dispatch::Dispatcher;
pub use http::{HttpProber, Probe};
pub use outcome::{Outcome, ProbeResult};
pub use report::{Bucket, Report};

use crate::config::CheckerConfig;
use crate::error::CheckError;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Check every URL and return the categorized report.
///
/// `urls` should already be deduplicated. Cancelling `cancel` (or hitting
/// `config.batch_timeout`) stops the batch with `CheckError::BatchAborted`.
pub async fn check_urls(
    urls: Vec<String>,
    config: &CheckerConfig,
    cancel: &CancellationToken,
) -> Result<Report, CheckError> {
    config.validate()?;
    let prober = Arc::new(HttpProber::new(config)?);
    run_batch(prober, urls, config, cancel).await
}

/// Same as [`check_urls`] but with a caller-supplied prober.
pub async fn check_urls_with(
    prober: Arc<dyn Probe>,
    urls: Vec<String>,
    config: &CheckerConfig,
    cancel: &CancellationToken,
) -> Result<Report, CheckError> {
    config.validate()?;
    run_batch(prober, urls, config, cancel).await
}

async fn run_batch(
    prober: Arc<dyn Probe>,
    urls: Vec<String>,
    config: &CheckerConfig,
    cancel: &CancellationToken,
) -> Result<Report, CheckError> {
    let start = Instant::now();
    let total = urls.len();

    // A child token: the deadline cancels this batch only, never the caller's
    let batch_cancel = cancel.child_token();
    let _deadline = config.batch_timeout.map(|limit| {
        let token = batch_cancel.clone();
        // Dropping the guard at the end of the batch aborts the timer
        let timer = tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            token.cancel();
        });
        AbortOnDrop(timer)
    });

    let dispatcher = Dispatcher::new(prober, config.concurrency);
    let results = dispatcher.dispatch(urls, &batch_cancel).await?;
    let report = Report::aggregate(&results);

    info!(
        total,
        ok = report.bucket(Bucket::Ok).len(),
        redirect = report.bucket(Bucket::Redirect).len(),
        forbidden = report.bucket(Bucket::Forbidden).len(),
        not_found = report.bucket(Bucket::NotFound).len(),
        server_error = report.bucket(Bucket::ServerError).len(),
        error = report.bucket(Bucket::Error).len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch finished"
    );

    Ok(report)
}

struct AbortOnDrop(tokio::task::JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Sleepy(Duration);

    #[async_trait]
    impl Probe for Sleepy {
        async fn probe(&self, _url: &str) -> Outcome {
            tokio::time::sleep(self.0).await;
            Outcome::StatusCode(200)
        }
    }

    #[tokio::test]
    async fn test_check_urls_against_local_server() {
        let server = MockServer::start().await;
        for (route, code) in [("/ok", 200u16), ("/moved", 302), ("/gone", 404), ("/boom", 502)] {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(code))
                .mount(&server)
                .await;
        }

        let urls: Vec<String> = ["/ok", "/moved", "/gone", "/boom"]
            .iter()
            .map(|route| format!("{}{}", server.uri(), route))
            .chain(std::iter::once("www.example.com".to_string()))
            .collect();

        // Keep the 302 itself so it lands in "301_302"
        let config = CheckerConfig {
            follow_redirects: false,
            ..CheckerConfig::default()
        };
        let report = check_urls(urls, &config, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(report.len(), 5);
        assert_eq!(report.bucket(Bucket::Ok), [format!("{}/ok", server.uri())]);
        assert_eq!(report.bucket(Bucket::Redirect), [format!("{}/moved", server.uri())]);
        assert_eq!(report.bucket(Bucket::NotFound), [format!("{}/gone", server.uri())]);
        assert_eq!(report.bucket(Bucket::ServerError), [format!("{}/boom", server.uri())]);
        assert_eq!(report.bucket(Bucket::Error), ["www.example.com".to_string()]);
        assert!(report.bucket(Bucket::Forbidden).is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch_has_all_buckets() {
        let report = check_urls(Vec::new(), &CheckerConfig::default(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(report.iter().count(), 6);
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let config = CheckerConfig {
            concurrency: 0,
            ..CheckerConfig::default()
        };
        let err = check_urls(vec!["https://example.com".to_string()], &config, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CheckError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn test_batch_timeout_aborts() {
        let config = CheckerConfig {
            concurrency: 1,
            batch_timeout: Some(Duration::from_millis(50)),
            ..CheckerConfig::default()
        };
        let urls = (0..5).map(|i| format!("https://example.com/{}", i)).collect();
        let cancel = CancellationToken::new();

        let err = check_urls_with(Arc::new(Sleepy(Duration::from_secs(5))), urls, &config, &cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, CheckError::BatchAborted { total: 5, .. }));
        // The deadline only cancels the batch, not the caller's token
        assert!(!cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_batch_timeout_not_hit() {
        let config = CheckerConfig {
            concurrency: 5,
            batch_timeout: Some(Duration::from_secs(5)),
            ..CheckerConfig::default()
        };
        let urls = (0..5).map(|i| format!("https://example.com/{}", i)).collect();

        let report = check_urls_with(
            Arc::new(Sleepy(Duration::from_millis(10))),
            urls,
            &config,
            &CancellationToken::new(),
        )
        .await
        .unwrap();
        assert_eq!(report.bucket(Bucket::Ok).len(), 5);
    }
}
