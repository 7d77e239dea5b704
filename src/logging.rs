// src/logging.rs
// =============================================================================
// Logger setup.
//
// Logs go to stderr through env_logger so they never mix with the crawl
// results on stdout.
//
// Precedence for this crate's own logs:
//   1. --log-level, when given
//   2. RUST_LOG, when set (e.g. RUST_LOG=bfs_crawler=debug)
//   3. warn
// =============================================================================

use std::io::Write;

use log::LevelFilter;

/// Level used for this crate when neither the flag nor RUST_LOG says otherwise.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Initializes env_logger from RUST_LOG and the optional --log-level.
///
/// Returns an error if a logger is already installed (only happens in tests).
pub fn init_logger(level: Option<LevelFilter>) -> Result<(), log::SetLoggerError> {
    let rust_log = std::env::var(env_logger::DEFAULT_FILTER_ENV)
        .ok()
        .filter(|filters| !filters.trim().is_empty());
    logger_builder(level, rust_log.as_deref()).try_init()
}

// Builds the logger without installing it, so the filter rules can be tested
fn logger_builder(level: Option<LevelFilter>, rust_log: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    // HTML parsing and the HTTP stack are chatty at debug level
    builder.filter_module("html5ever", LevelFilter::Error);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("rustls", LevelFilter::Warn);

    match rust_log {
        // Directives parsed later win over the caps above for the same module
        Some(filters) => {
            builder.parse_filters(filters);
        }
        None => {
            builder.filter_module("bfs_crawler", DEFAULT_LEVEL);
        }
    }

    if let Some(level) = level {
        builder.filter_module("bfs_crawler", level);
    }

    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {}] {}",
            record.level(),
            record.target(),
            record.args()
        )
    });

    builder
}
