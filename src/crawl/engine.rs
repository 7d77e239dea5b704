// src/crawl/engine.rs
// =============================================================================
// Wires the crawl together and runs it to completion.
//
//   seed --> Frontier --> DedupFilter --> worker queue --> N workers
//              ^                                              |
//              +-------------- discovered links --------------+
//                                                             |
//                                          page results --> ResultSink
//
// Shutdown: the termination detector goes Quiescent, the dedup filter sees
// it and returns (dropping the worker-queue sender), every worker's recv()
// returns None, the workers are joined, and the sink is flushed.
// =============================================================================

use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use log::{debug, info, warn};
use tokio::sync::{mpsc, Mutex};
use url::Url;

use super::dedup::DedupFilter;
use super::frontier::Frontier;
use super::stats::{CrawlStats, CrawlSummary};
use super::termination::TerminationDetector;
use super::worker::{run_worker, WorkerContext};
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::output::ResultSink;
use crate::page::build_client;

/// Crawls everything reachable from `seed` and returns what happened.
///
/// Only HTTP client construction can fail; everything after that is
/// recovered inside the crawl.
pub async fn crawl(
    seed: &Url,
    config: &CrawlConfig,
    sink: Arc<ResultSink>,
) -> Result<CrawlSummary, CrawlError> {
    let started = Instant::now();
    let client = build_client(config.request_timeout)?;

    let detector = Arc::new(TerminationDetector::new());
    let stats = Arc::new(CrawlStats::default());
    let (frontier, frontier_rx) = Frontier::new(Arc::clone(&detector));
    let (admitted_tx, admitted_rx) = mpsc::unbounded_channel();

    // The seed is counted before the filter or any worker can look at the counter
    frontier.submit(seed.to_string());

    let dedup = tokio::spawn(DedupFilter::new().run(
        frontier_rx,
        admitted_tx,
        Arc::clone(&detector),
        Arc::clone(&stats),
    ));

    let ctx = Arc::new(WorkerContext {
        client,
        frontier,
        queue: Mutex::new(admitted_rx),
        sink: Arc::clone(&sink),
        detector: Arc::clone(&detector),
        stats: Arc::clone(&stats),
    });

    info!("crawling {} with {} workers", seed, config.workers);
    let workers = (0..config.workers).map(|id| tokio::spawn(run_worker(id, Arc::clone(&ctx))));
    for outcome in join_all(workers).await {
        if let Err(e) = outcome {
            warn!("worker task ended abnormally: {}", e);
        }
    }

    debug!(
        "workers joined: state {:?}, {} in flight, {} fetching",
        detector.state(),
        detector.in_flight(),
        detector.active_fetches()
    );

    match dedup.await {
        Ok(filter) => info!("crawl quiescent after {} distinct URLs", filter.seen_count()),
        Err(e) => warn!("dedup filter ended abnormally: {}", e),
    }

    if let Err(e) = sink.finish() {
        warn!("could not flush results: {}", e);
    }

    Ok(stats.summary(seed.as_str(), started.elapsed()))
}
