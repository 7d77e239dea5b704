// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Usage:
//   bfs-crawler https://example.com/
//   bfs-crawler https://example.com/ --workers 8 --timeout 5 --output-dir out/
//
// Exit codes (handled in main.rs):
//   0 = crawl finished
//   1 = missing argument / bad usage
//   2 = malformed seed URL
//   3 = output file could not be created
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use crate::config::{CrawlConfig, DEFAULT_TIMEOUT_SECS, DEFAULT_WORKERS};

#[derive(Parser, Debug)]
#[command(
    name = "bfs-crawler",
    version,
    about = "Crawl a website breadth-first and record every page's outbound links",
    long_about = "bfs-crawler starts at a seed URL, follows every link it finds and writes, \
                  for each page it fetched, the fetch start/stop times and the http(s) links \
                  on that page. Output goes to stdout and to a timestamped .txt file."
)]
pub struct Cli {
    /// URL to start crawling from (e.g., https://example.com/)
    pub seed_url: String,

    /// Number of concurrent fetch/parse workers
    #[arg(long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Directory the results file is written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Log level for crawler diagnostics on stderr [default: RUST_LOG, else warn]
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Print a JSON summary of the crawl on stdout when it finishes
    #[arg(long)]
    pub json: bool,
}

/// Verbosity choices for --log-level
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl Cli {
    /// The seed as typed, without the whitespace shells and copy-paste leave around it.
    pub fn seed_argument(&self) -> &str {
        self.seed_url.trim()
    }

    /// The explicit --log-level, if one was given.
    pub fn log_filter(&self) -> Option<LevelFilter> {
        self.log_level.map(LevelFilter::from)
    }

    /// The engine settings these arguments describe.
    pub fn crawl_config(&self) -> CrawlConfig {
        CrawlConfig::new(
            self.workers,
            Duration::from_secs(self.timeout),
            self.output_dir.clone(),
        )
    }
}
