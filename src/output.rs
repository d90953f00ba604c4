// src/output.rs
// =============================================================================
// Renders a Report for people and for other programs.
//
// - CSV: header "URL,Status", one row per URL naming its bucket
// - JSON: object keyed by bucket name, each value an array of URLs
// - Response: everything the upload endpoint used to send back in one
//   JSON document (all URLs, unique URLs, report, plus CSV/JSON text)
// - Table: for the terminal
// =============================================================================

use crate::checker::{Bucket, Report};
use crate::extract::Extraction;
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// CSV with `\r\n` line endings; fields are quoted only when they need it.
pub fn to_csv(report: &Report) -> String {
    let mut out = String::from("URL,Status\r\n");
    for (bucket, urls) in report.iter() {
        for url in urls {
            out.push_str(&csv_field(url));
            out.push(',');
            out.push_str(&csv_field(bucket.as_str()));
            out.push_str("\r\n");
        }
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Pretty-printed with a four-space indent.
pub fn to_json(report: &Report) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    report.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(serde_json::Error::custom)
}

/// The full result document.
#[derive(Debug, Serialize)]
pub struct Response<'a> {
    pub urls: &'a [String],
    pub unique_urls: &'a [String],
    pub status_results: &'a Report,
    pub csv_data: String,
    pub json_data: String,
}

impl<'a> Response<'a> {
    pub fn new(extraction: &'a Extraction, report: &'a Report) -> serde_json::Result<Self> {
        Ok(Self {
            urls: &extraction.urls,
            unique_urls: &extraction.unique_urls,
            status_results: report,
            csv_data: to_csv(report),
            json_data: to_json(report)?,
        })
    }
}

// Prints results as a human-readable table in the terminal
pub fn print_table(report: &Report) {
    println!("{:<70} {:<10}", "URL", "STATUS");
    println!("{}", "=".repeat(81));

    for (bucket, urls) in report.iter() {
        for url in urls {
            println!("{:<70} {:<10}", truncate(url, 67), bucket.as_str());
        }
    }

    println!();
    println!("Summary:");
    for bucket in Bucket::ALL {
        println!("   {:<8} {}", bucket.as_str(), report.bucket(bucket).len());
    }
    println!("   {:<8} {}", "total", report.len());
}

// Truncate URL if too long for display, on a char boundary
fn truncate(url: &str, max_chars: usize) -> String {
    if url.chars().count() > max_chars {
        let cut: String = url.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        url.to_string()
    }
}
