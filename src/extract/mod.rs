// src/extract/mod.rs
// =============================================================================
// Turns uploaded text files into the list of URLs to check.
//
// Submodules:
// - urls: the URL regex and exact-match deduplication
// - sources: reading files and building an Extraction
//
// Nothing here touches the network.
// =============================================================================

mod sources;
mod urls;

pub use sources::{read_sources, Extraction, Source};
pub use urls::{dedup_urls, extract_urls};
