// src/extract/sources.rs
// =============================================================================
// Reads the uploaded text files and turns them into an Extraction.
//
// Mirrors the checks the upload endpoint makes before anything is probed:
// no files at all, or only empty file names, is an input error.
// =============================================================================

use super::urls::{dedup_urls, extract_urls};
use crate::error::InputError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One uploaded file's decoded text.
#[derive(Debug, Clone)]
pub struct Source {
    pub path: PathBuf,
    pub text: String,
}

/// Every URL found, and the deduplicated set that gets checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub urls: Vec<String>,
    pub unique_urls: Vec<String>,
}

impl Extraction {
    pub fn from_sources(sources: &[Source]) -> Self {
        let urls: Vec<String> = sources
            .iter()
            .flat_map(|source| {
                let found = extract_urls(&source.text);
                debug!(path = %source.path.display(), count = found.len(), "extracted urls");
                found
            })
            .collect();
        let unique_urls = dedup_urls(urls.iter().cloned());
        Self { urls, unique_urls }
    }
}

/// Read and UTF-8 decode every file.
///
/// Empty path strings stand for "a file field with nothing selected" and are
/// skipped; if that leaves nothing, the selection was empty.
pub fn read_sources<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Source>, InputError> {
    if paths.is_empty() {
        return Err(InputError::NoFiles);
    }

    let selected: Vec<&Path> = paths
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    if selected.is_empty() {
        return Err(InputError::NoSelectedFile);
    }

    selected.into_iter().map(read_source).collect()
}

fn read_source(path: &Path) -> Result<Source, InputError> {
    let bytes = std::fs::read(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| InputError::NotUtf8 {
        path: path.to_path_buf(),
    })?;
    Ok(Source {
        path: path.to_path_buf(),
        text,
    })
}
