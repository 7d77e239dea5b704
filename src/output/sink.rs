// src/output/sink.rs
// =============================================================================
// The result sink: writes one block per crawled page.
//
// Block format (identical on the console and in the file):
//
//   Start time of crawl of this URL: 2026-10-19 16:30:01.123456789 +02:00
//   Stop time of crawl of this URL: 2026-10-19 16:30:01.345678901 +02:00
//   http://example.com/
//   \thttp://example.com/about
//   \thttps://other.org/
//
// Only http and https links are printed. mailto:, javascript: and anything
// that doesn't parse as a URL are left out of the output (the workers still
// submitted them to the frontier; this is purely an output filter).
//
// Many workers record results at the same time. One mutex guards BOTH
// writers, and a block is rendered to a String before the lock is taken, so
// a block is always written whole and never interleaved with another.
// =============================================================================

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Local};
use url::Url;

/// Timestamp layout used for the start/stop lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f %:z";

/// The outcome of fetching and parsing one page.
#[derive(Debug, Clone)]
pub struct PageResult {
    /// The page that was fetched
    pub url: String,
    /// Wall-clock time just before the request was sent
    pub started_at: DateTime<Local>,
    /// Wall-clock time after all links were processed
    pub stopped_at: DateTime<Local>,
    /// Absolute URLs found on the page, in document order, duplicates kept
    pub links: Vec<String>,
}

struct Writers {
    console: Box<dyn Write + Send>,
    file: Box<dyn Write + Send>,
}

/// Serialized, duplicated output for page results.
pub struct ResultSink {
    writers: Mutex<Writers>,
}

impl ResultSink {
    /// Creates a sink over any two writers (tests pass buffers or temp files).
    pub fn new(console: Box<dyn Write + Send>, file: Box<dyn Write + Send>) -> Self {
        Self {
            writers: Mutex::new(Writers { console, file }),
        }
    }

    /// The production sink: stdout plus a buffered output file.
    pub fn stdout_and_file(file: File) -> Self {
        Self::new(Box::new(io::stdout()), Box::new(BufWriter::new(file)))
    }

    /// Writes one page's block to the console and the file.
    pub fn record(&self, result: &PageResult) -> io::Result<()> {
        let block = format_block(result);

        let mut writers = self.lock();
        // A closed stdout must not cost us the file copy
        let writers = &mut *writers;
        let console = writers
            .console
            .write_all(block.as_bytes())
            .and_then(|()| writers.console.flush());
        let file = writers.file.write_all(block.as_bytes());
        console.and(file)
    }

    /// Flushes both writers. Called once the crawl is quiescent.
    pub fn finish(&self) -> io::Result<()> {
        let mut writers = self.lock();
        writers.console.flush()?;
        writers.file.flush()
    }

    fn lock(&self) -> MutexGuard<'_, Writers> {
        // A panic mid-write can't leave the writers in a state we care about
        self.writers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Renders a page result as the text block described above.
pub fn format_block(result: &PageResult) -> String {
    let mut block = format!(
        "Start time of crawl of this URL: {}\nStop time of crawl of this URL: {}\n{}\n",
        result.started_at.format(TIMESTAMP_FORMAT),
        result.stopped_at.format(TIMESTAMP_FORMAT),
        result.url,
    );

    for link in result.links.iter().filter(|link| is_web_link(link)) {
        block.push('\t');
        block.push_str(link);
        block.push('\n');
    }

    block
}

// True for strings that parse as URLs with scheme exactly http or https
fn is_web_link(link: &str) -> bool {
    Url::parse(link)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}
