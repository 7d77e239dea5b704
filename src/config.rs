// src/config.rs
// =============================================================================
// Runtime settings for a crawl.
//
// The CLI (src/cli.rs) is the only place these values come from, but the
// crawl engine only ever sees a CrawlConfig. That keeps the engine testable
// without going through argument parsing.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

/// Number of fetch/parse workers when `--workers` is not given.
pub const DEFAULT_WORKERS: usize = 5;

/// Per-request timeout in seconds when `--timeout` is not given.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// How many redirects a single fetch may follow.
pub const MAX_REDIRECTS: usize = 10;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("bfs-crawler/", env!("CARGO_PKG_VERSION"));

/// Settings the crawl engine needs.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Size of the worker pool (always at least 1)
    pub workers: usize,
    /// Upper bound on a single page fetch
    pub request_timeout: Duration,
    /// Directory the result file is created in
    pub output_dir: PathBuf,
}

impl CrawlConfig {
    /// Builds a config, clamping the worker count to at least one.
    pub fn new(workers: usize, request_timeout: Duration, output_dir: PathBuf) -> Self {
        Self {
            workers: workers.max(1),
            request_timeout,
            output_dir,
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_WORKERS,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            PathBuf::from("."),
        )
    }
}
