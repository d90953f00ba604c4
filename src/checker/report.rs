// src/checker/report.rs
// =============================================================================
// The aggregator: sorts probe outcomes into six fixed buckets.
//
//   StatusCode(200)        -> "200"
//   StatusCode(301 | 302)  -> "301_302"
//   StatusCode(403)        -> "403"
//   StatusCode(404)        -> "404"
//   StatusCode(>= 500)     -> "500+"
//   anything else          -> "error"   (201, 418, Timeout, NetworkError...)
//
// All six keys are always present in a Report, even when empty, and every
// input URL lands in exactly one of them.
// =============================================================================

use super::outcome::{Outcome, ProbeResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

// Variant order is the key order used by the JSON and CSV output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Bucket {
    #[serde(rename = "200")]
    Ok,
    #[serde(rename = "301_302")]
    Redirect,
    #[serde(rename = "403")]
    Forbidden,
    #[serde(rename = "404")]
    NotFound,
    #[serde(rename = "500+")]
    ServerError,
    #[serde(rename = "error")]
    Error,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::Ok,
        Bucket::Redirect,
        Bucket::Forbidden,
        Bucket::NotFound,
        Bucket::ServerError,
        Bucket::Error,
    ];

    pub fn classify(outcome: &Outcome) -> Bucket {
        match outcome {
            Outcome::StatusCode(200) => Bucket::Ok,
            Outcome::StatusCode(301 | 302) => Bucket::Redirect,
            Outcome::StatusCode(403) => Bucket::Forbidden,
            Outcome::StatusCode(404) => Bucket::NotFound,
            Outcome::StatusCode(code) if *code >= 500 => Bucket::ServerError,
            Outcome::StatusCode(_) | Outcome::Timeout | Outcome::NetworkError(_) => Bucket::Error,
        }
    }

    /// The report key, e.g. `"301_302"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Ok => "200",
            Bucket::Redirect => "301_302",
            Bucket::Forbidden => "403",
            Bucket::NotFound => "404",
            Bucket::ServerError => "500+",
            Bucket::Error => "error",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket name -> URLs, built once per batch.
///
/// Serializes as a JSON object keyed by bucket name in fixed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    buckets: BTreeMap<Bucket, Vec<String>>,
}

impl Report {
    /// A report with all six buckets present and empty.
    pub fn empty() -> Self {
        Self {
            buckets: Bucket::ALL.iter().map(|b| (*b, Vec::new())).collect(),
        }
    }

    /// Classify every result. URLs keep the order they were iterated in.
    pub fn aggregate<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a ProbeResult>,
    {
        let mut report = Self::empty();
        for result in results {
            report
                .buckets
                .entry(Bucket::classify(&result.outcome))
                .or_default()
                .push(result.url.clone());
        }
        report
    }

    pub fn bucket(&self, bucket: Bucket) -> &[String] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Buckets in fixed key order.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[String])> {
        self.buckets.iter().map(|(b, urls)| (*b, urls.as_slice()))
    }

    /// Total URLs across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when every URL came back 200.
    pub fn all_ok(&self) -> bool {
        self.len() == self.bucket(Bucket::Ok).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_classify_table() {
        let cases = [
            (Outcome::StatusCode(200), "200"),
            (Outcome::StatusCode(301), "301_302"),
            (Outcome::StatusCode(302), "301_302"),
            (Outcome::StatusCode(403), "403"),
            (Outcome::StatusCode(404), "404"),
            (Outcome::StatusCode(500), "500+"),
            (Outcome::StatusCode(503), "500+"),
            (Outcome::StatusCode(201), "error"),
            (Outcome::StatusCode(303), "error"),
            (Outcome::StatusCode(410), "error"),
            (Outcome::Timeout, "error"),
            (Outcome::NetworkError("refused".to_string()), "error"),
        ];
        for (outcome, expected) in cases {
            assert_eq!(Bucket::classify(&outcome).as_str(), expected, "{:?}", outcome);
        }
    }

    #[test]
    fn test_empty_report_has_every_key() {
        let report = Report::aggregate(&Vec::<ProbeResult>::new());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "200": [], "301_302": [], "403": [], "404": [], "500+": [], "error": []
            })
        );
        assert!(report.is_empty());
    }

    #[test]
    fn test_every_url_lands_in_exactly_one_bucket() {
        let results: Vec<ProbeResult> = (0..50u16)
            .map(|i| {
                let outcome = match i % 5 {
                    0 => Outcome::StatusCode(200),
                    1 => Outcome::StatusCode(302),
                    2 => Outcome::StatusCode(500 + i),
                    3 => Outcome::Timeout,
                    _ => Outcome::NetworkError("dns".to_string()),
                };
                ProbeResult::new(format!("https://example.com/{}", i), outcome)
            })
            .collect();

        let report = Report::aggregate(&results);
        assert_eq!(report.len(), 50);

        let mut seen = HashSet::new();
        for (_, urls) in report.iter() {
            for url in urls {
                assert!(seen.insert(url.clone()), "{} appears twice", url);
            }
        }
        assert_eq!(seen.len(), 50);
        assert_eq!(report.bucket(Bucket::Error).len(), 20);
    }

    #[test]
    fn test_aggregate_is_repeatable() {
        let results = vec![
            ProbeResult::new("a", Outcome::StatusCode(404)),
            ProbeResult::new("b", Outcome::StatusCode(200)),
            ProbeResult::new("c", Outcome::Timeout),
        ];
        let first = Report::aggregate(&results);
        let second = Report::aggregate(results.iter().rev());

        for bucket in Bucket::ALL {
            let a: HashSet<_> = first.bucket(bucket).iter().collect();
            let b: HashSet<_> = second.bucket(bucket).iter().collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_all_ok() {
        let results = vec![ProbeResult::new("a", Outcome::StatusCode(200))];
        assert!(Report::aggregate(&results).all_ok());

        let results = vec![
            ProbeResult::new("a", Outcome::StatusCode(200)),
            ProbeResult::new("b", Outcome::StatusCode(301)),
        ];
        assert!(!Report::aggregate(&results).all_ok());
    }
}
