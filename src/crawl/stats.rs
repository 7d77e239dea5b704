// src/crawl/stats.rs
// =============================================================================
// Counters collected while crawling, and the summary printed at the end.
//
// Every counter is an AtomicUsize so workers and the dedup actor can bump
// them without sharing a lock. Relaxed ordering is enough here: the numbers
// are only read once all tasks have been joined.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Default)]
pub struct CrawlStats {
    urls_admitted: AtomicUsize,
    duplicates_dropped: AtomicUsize,
    pages_recorded: AtomicUsize,
    fetch_failures: AtomicUsize,
    links_discovered: AtomicUsize,
    malformed_links: AtomicUsize,
}

impl CrawlStats {
    pub fn url_admitted(&self) {
        self.urls_admitted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn duplicate_dropped(&self) {
        self.duplicates_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn page_recorded(&self) {
        self.pages_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_failed(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn links_discovered(&self, count: usize) {
        self.links_discovered.fetch_add(count, Ordering::Relaxed);
    }

    pub fn malformed_link(&self) {
        self.malformed_links.fetch_add(1, Ordering::Relaxed);
    }

    /// Freezes the counters into a summary.
    pub fn summary(&self, seed_url: &str, elapsed: Duration) -> CrawlSummary {
        CrawlSummary {
            seed_url: seed_url.to_string(),
            urls_admitted: self.urls_admitted.load(Ordering::Relaxed),
            duplicates_dropped: self.duplicates_dropped.load(Ordering::Relaxed),
            pages_recorded: self.pages_recorded.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            links_discovered: self.links_discovered.load(Ordering::Relaxed),
            malformed_links: self.malformed_links.load(Ordering::Relaxed),
            elapsed_secs: elapsed.as_secs_f64(),
        }
    }
}

/// What a finished crawl did, suitable for `--json` output.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    pub seed_url: String,
    /// Distinct URLs that passed the dedup filter (one fetch attempt each)
    pub urls_admitted: usize,
    pub duplicates_dropped: usize,
    pub pages_recorded: usize,
    pub fetch_failures: usize,
    pub links_discovered: usize,
    pub malformed_links: usize,
    pub elapsed_secs: f64,
}
