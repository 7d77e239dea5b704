// src/error.rs
// =============================================================================
// The crawler's error taxonomy.
//
// Two kinds of errors live here:
// - Startup errors (bad seed URL, unwritable output file, HTTP client setup).
//   These abort the program before crawling starts, each with its own exit code.
// - In-crawl errors (a malformed link, a failed fetch). These are recovered
//   where they happen: the link or page is skipped and the crawl goes on.
//
// Rust concepts:
// - thiserror: derive Display and Error for an enum with #[error(...)]
// - Enums with named fields: each variant carries the context it needs
// =============================================================================

use thiserror::Error;

/// Every error the crawler knows how to name.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed URL could not be parsed or is not http(s).
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeedUrl { url: String, reason: String },

    /// The output file could not be created.
    #[error("cannot create output file '{path}': {source}")]
    OutputSinkUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A discovered link (or its base) could not be turned into an absolute URL.
    #[error("malformed URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },

    /// A page could not be fetched (network error, timeout, non-2xx status).
    #[error("failed to fetch {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    /// The shared HTTP client could not be constructed.
    #[error("HTTP client initialization error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl CrawlError {
    /// Builds a `MalformedUrl` error from anything printable.
    pub fn malformed(url: &str, reason: impl ToString) -> Self {
        CrawlError::MalformedUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Process exit code used when this error ends the program.
    ///
    /// Only startup errors ever reach `main`; the in-crawl variants get the
    /// generic internal-error code in case one slips through.
    pub fn exit_code(&self) -> i32 {
        match self {
            CrawlError::InvalidSeedUrl { .. } => 2,
            CrawlError::OutputSinkUnavailable { .. } => 3,
            CrawlError::MalformedUrl { .. }
            | CrawlError::FetchFailure { .. }
            | CrawlError::HttpClient(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_exit_codes() {
        let seed = CrawlError::InvalidSeedUrl {
            url: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(seed.exit_code(), 2);

        let sink = CrawlError::OutputSinkUnavailable {
            path: "/no/such/dir/out.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(sink.exit_code(), 3);
    }

    #[test]
    fn test_error_messages_name_the_url() {
        let err = CrawlError::malformed("ht!tp://[", "colon in first path segment");
        let message = err.to_string();
        assert!(message.contains("ht!tp://["));
        assert!(message.contains("colon in first path segment"));
    }
}
