// src/crawl/worker.rs
// =============================================================================
// A fetch/parse worker.
//
// How it works:
// 1. Take the next admitted URL from the shared worker queue
// 2. Fetch the page (short timeout, no retries, bad certificates accepted)
// 3. Extract every href and resolve it against the page URL
// 4. Push each resolved URL back into the frontier and onto this page's
//    result, duplicates included (the dedup filter sorts them out later)
// 5. Hand the page result to the result sink
// 6. Tell the termination detector this URL is done (a drop guard does
//    this, so it still happens if the worker panics mid-page)
//
// Step 6 always comes after step 4. The links a page produced are already
// counted as in-flight when the page itself stops counting, so the crawl
// can't be declared finished while it is still growing.
//
// Failures stay local: a page that can't be fetched is skipped, a link that
// can't be resolved is dropped, and a sink write error is logged.
// =============================================================================

use std::sync::Arc;

use chrono::Local;
use log::{debug, warn};
use reqwest::Client;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;

use super::frontier::Frontier;
use super::normalize::normalize;
use super::stats::CrawlStats;
use super::termination::TerminationDetector;
use crate::output::{PageResult, ResultSink};
use crate::page::{extract_hrefs, fetch_page};

/// Everything a worker shares with the rest of the crawl.
pub struct WorkerContext {
    pub client: Client,
    pub frontier: Frontier,
    /// Admitted URLs, shared by the whole pool
    pub queue: Mutex<UnboundedReceiver<String>>,
    pub sink: Arc<ResultSink>,
    pub detector: Arc<TerminationDetector>,
    pub stats: Arc<CrawlStats>,
}

/// Runs one worker until the worker queue closes.
pub async fn run_worker(id: usize, ctx: Arc<WorkerContext>) {
    debug!("worker {} started", id);

    loop {
        // Only one worker waits on the channel at a time; the rest wait on the lock
        let next = ctx.queue.lock().await.recv().await;
        let Some(url) = next else {
            break;
        };

        // Drop order is reverse declaration: the fetch ends before the task does
        let _task = ctx.detector.claim_task();
        let _fetching = ctx.detector.fetch_started();
        crawl_page(&ctx, &url).await;
    }

    debug!("worker {} exiting", id);
}

// One fetch/parse cycle for a single admitted URL
async fn crawl_page(ctx: &WorkerContext, url: &str) {
    let started_at = Local::now();

    let body = match fetch_page(&ctx.client, url).await {
        Ok(body) => body,
        Err(e) => {
            debug!("skipping page: {}", e);
            ctx.stats.fetch_failed();
            return;
        }
    };

    let mut links = Vec::new();
    for href in extract_hrefs(&body) {
        match normalize(&href, url) {
            Ok(absolute) => {
                ctx.frontier.submit(absolute.clone());
                links.push(absolute);
            }
            Err(e) => {
                debug!("dropping link on {}: {}", url, e);
                ctx.stats.malformed_link();
            }
        }
    }
    ctx.stats.links_discovered(links.len());

    let result = PageResult {
        url: url.to_string(),
        started_at,
        stopped_at: Local::now(),
        links,
    };

    match ctx.sink.record(&result) {
        Ok(()) => ctx.stats.page_recorded(),
        Err(e) => warn!("could not record result for {}: {}", url, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::build_client;
    use mockito::Server;
    use std::io::{self, Read};
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct Harness {
        ctx: Arc<WorkerContext>,
        frontier_rx: UnboundedReceiver<String>,
        output: tempfile::NamedTempFile,
    }

    fn harness() -> Harness {
        let detector = Arc::new(TerminationDetector::new());
        let (frontier, frontier_rx) = Frontier::new(Arc::clone(&detector));
        let (_admitted_tx, admitted_rx) = mpsc::unbounded_channel();

        let output = tempfile::NamedTempFile::new().unwrap();
        let sink = ResultSink::new(Box::new(io::sink()), Box::new(output.reopen().unwrap()));

        let ctx = Arc::new(WorkerContext {
            client: build_client(Duration::from_secs(5)).unwrap(),
            frontier,
            queue: Mutex::new(admitted_rx),
            sink: Arc::new(sink),
            detector,
            stats: Arc::new(CrawlStats::default()),
        });

        Harness {
            ctx,
            frontier_rx,
            output,
        }
    }

    #[tokio::test]
    async fn test_page_links_are_resubmitted_and_recorded() {
        let mut server = Server::new_async().await;
        let _page = server
            .mock("GET", "/dir/index.html")
            .with_status(200)
            .with_body(
                r#"<a href="other.html">x</a>
                   <a href="/top">y</a>
                   <a href="other.html">again</a>
                   <a href="mailto:me@x.com">mail</a>
                   <a href="ht!tp://[">broken</a>"#,
            )
            .create_async()
            .await;

        let mut h = harness();
        let base = server.url();
        crawl_page(&h.ctx, &format!("{}/dir/index.html", base)).await;

        let mut submitted = Vec::new();
        while let Ok(url) = h.frontier_rx.try_recv() {
            submitted.push(url);
        }
        assert_eq!(
            submitted,
            vec![
                format!("{}/dir/other.html", base),
                format!("{}/top", base),
                format!("{}/dir/other.html", base),
                "mailto:me@x.com".to_string(),
            ]
        );
        assert_eq!(h.ctx.detector.in_flight(), 4);

        let mut output = String::new();
        h.output.read_to_string(&mut output).unwrap();
        assert_eq!(output.matches("\thttp://").count(), 3);
        assert!(!output.contains("mailto:"));

        let summary = h.ctx.stats.summary(&base, Duration::ZERO);
        assert_eq!(summary.pages_recorded, 1);
        assert_eq!(summary.links_discovered, 4);
        assert_eq!(summary.malformed_links, 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_produces_no_result() {
        let mut server = Server::new_async().await;
        let _gone = server
            .mock("GET", "/gone")
            .with_status(410)
            .create_async()
            .await;

        let mut h = harness();
        crawl_page(&h.ctx, &format!("{}/gone", server.url())).await;

        assert!(h.frontier_rx.try_recv().is_err());

        let mut output = String::new();
        h.output.read_to_string(&mut output).unwrap();
        assert!(output.is_empty());

        let summary = h.ctx.stats.summary("", Duration::ZERO);
        assert_eq!(summary.fetch_failures, 1);
        assert_eq!(summary.pages_recorded, 0);
    }
}
