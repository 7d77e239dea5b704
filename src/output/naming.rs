// src/output/naming.rs
// =============================================================================
// Names and creates the results file.
//
// The name is built from the seed URL and the time the crawl started:
//
//   https://example.com/blog/ at 2026-10-19 16:30:05
//     -> example.com-blog-_2026-10-19_16-30-05.txt
//
// The scheme is dropped and every '/' becomes '-' so the seed can be used as
// a file name.
// =============================================================================

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::error::CrawlError;

/// Builds `<seed without scheme, '/' -> '-'>_<YYYY-MM-DD_HH-MM-SS>.txt`.
pub fn output_file_name(seed_url: &str, now: DateTime<Local>) -> String {
    let stem = seed_url
        .strip_prefix("http://")
        .or_else(|| seed_url.strip_prefix("https://"))
        .unwrap_or(seed_url)
        .replace('/', "-");

    format!("{}_{}.txt", stem, now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Creates the results file for `seed_url` inside `dir`.
pub fn create_output_file(dir: &Path, seed_url: &str) -> Result<(PathBuf, File), CrawlError> {
    let path = dir.join(output_file_name(seed_url, Local::now()));

    let file = File::create(&path).map_err(|source| CrawlError::OutputSinkUnavailable {
        path: path.display().to_string(),
        source,
    })?;

    Ok((path, file))
}
