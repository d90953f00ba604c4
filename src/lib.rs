// src/lib.rs
// =============================================================================
// link-status: find URLs in text and report the live HTTP status of each.
//
// Modules:
// - checker: the concurrent status checker (dispatcher, prober, report)
// - extract: URL extraction and exact-match deduplication
// - output: CSV / JSON / table rendering of a report
// - config: tunables for one batch
// - error: library error types
//
// Typical use from a front end:
//
//     let sources = extract::read_sources(&paths)?;
//     let extraction = Extraction::from_sources(&sources);
//     let report = check_urls(extraction.unique_urls.clone(), &config, &cancel).await?;
// =============================================================================

pub mod checker;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;

pub use checker::{check_urls, Bucket, Outcome, ProbeResult, Report};
pub use config::CheckerConfig;
pub use error::{CheckError, InputError};
pub use extract::Extraction;
