// src/crawl/dedup.rs
// =============================================================================
// The dedup filter: the one place that decides whether a URL gets crawled.
//
// It runs as a single tokio task (an "actor") that owns the set of seen URLs.
// Workers never touch the set; they only send candidates through the
// frontier channel. Because one task processes candidates one after another,
// "is it new? then remember it" cannot race: two workers that find the same
// link at the same moment produce two messages, and only the first one gets
// through.
//
// Flow:
//   frontier channel --> [DedupFilter::run] --> worker queue
//                              |
//                              +--> duplicate: dropped, marked finished
//
// The actor stops when the termination detector reports Quiescent. Dropping
// the worker-queue sender at that point is what lets the workers' recv()
// return None so they leave their loops.
// =============================================================================

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, trace};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use super::stats::CrawlStats;
use super::termination::TerminationDetector;

/// Owner of the seen-URL set.
#[derive(Debug, Default)]
pub struct DedupFilter {
    seen: HashSet<String>,
}

impl DedupFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time a URL is offered, false afterwards.
    pub fn admit(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_string())
    }

    /// Number of distinct URLs admitted so far.
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Drives the filter until the crawl goes quiescent or the frontier closes.
    ///
    /// Returns the filter so callers can inspect what was admitted.
    pub async fn run(
        mut self,
        mut frontier: UnboundedReceiver<String>,
        admitted: UnboundedSender<String>,
        detector: Arc<TerminationDetector>,
        stats: Arc<CrawlStats>,
    ) -> Self {
        loop {
            tokio::select! {
                biased;

                candidate = frontier.recv() => {
                    let Some(url) = candidate else {
                        debug!("frontier closed, dedup filter stopping");
                        break;
                    };

                    if !self.admit(&url) {
                        trace!("duplicate dropped: {}", url);
                        stats.duplicate_dropped();
                        detector.task_finished();
                        continue;
                    }

                    stats.url_admitted();
                    if admitted.send(url).is_err() {
                        // No workers left to take it
                        detector.task_finished();
                    }
                }

                _ = detector.wait_quiescent() => {
                    debug!("dedup filter stopping after {} distinct URLs", self.seen_count());
                    break;
                }
            }
        }

        self
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why an actor instead of Arc<Mutex<HashSet>>?
//    - With a shared set, every worker needs the lock and the
//      contains-then-insert has to be written carefully every time
//    - Here only one task ever sees the set, so no lock is needed at all
//
// 2. What does `biased;` do in tokio::select!?
//    - select! normally picks a random ready branch
//    - biased polls branches top to bottom, so queued candidates are always
//      drained before we look at the shutdown signal
//
// 3. Why does admit() check contains() before insert()?
//    - insert() needs an owned String; checking first avoids allocating one
//      for every duplicate, which is most of the traffic on a real site
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::frontier::Frontier;
    use std::time::Duration;
    use tokio::sync::mpsc;

    #[test]
    fn test_admit_once() {
        let mut filter = DedupFilter::new();
        assert!(filter.admit("http://x.com/"));
        assert!(!filter.admit("http://x.com/"));
        assert!(filter.admit("http://x.com/a"));
        assert_eq!(filter.seen_count(), 2);
    }

    #[test]
    fn test_exact_string_match_only() {
        // No canonicalization beyond what the normalizer already did
        let mut filter = DedupFilter::new();
        assert!(filter.admit("http://x.com/a"));
        assert!(filter.admit("http://x.com/a#frag"));
        assert!(filter.admit("http://x.com/a/"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_duplicates_admitted_once() {
        let detector = Arc::new(TerminationDetector::new());
        let stats = Arc::new(CrawlStats::default());
        let (frontier, frontier_rx) = Frontier::new(Arc::clone(&detector));
        let (admitted_tx, mut admitted_rx) = mpsc::unbounded_channel();

        // Hold one unit of work so the filter cannot go quiescent mid-test
        detector.task_queued();

        let filter = tokio::spawn(DedupFilter::new().run(
            frontier_rx,
            admitted_tx,
            Arc::clone(&detector),
            Arc::clone(&stats),
        ));

        // Eight producers all submit the same twenty URLs
        let producers: Vec<_> = (0..8)
            .map(|_| {
                let frontier = frontier.clone();
                tokio::spawn(async move {
                    for i in 0..20 {
                        frontier.submit(format!("http://x.com/page{}", i));
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();
        for producer in producers {
            producer.await.unwrap();
        }

        let mut admitted = Vec::new();
        while admitted.len() < 20 {
            let url = tokio::time::timeout(Duration::from_secs(2), admitted_rx.recv())
                .await
                .expect("admitted URL arrives")
                .expect("channel open");
            admitted.push(url);
        }

        // Consume the admitted URLs and release the held unit: the crawl ends
        for _ in &admitted {
            detector.task_finished();
        }
        detector.task_finished();

        let filter = tokio::time::timeout(Duration::from_secs(2), filter)
            .await
            .expect("filter stops at quiescence")
            .unwrap();

        let distinct: HashSet<_> = admitted.iter().cloned().collect();
        assert_eq!(distinct.len(), 20);
        assert_eq!(filter.seen_count(), 20);
        assert!(admitted_rx.try_recv().is_err());

        let summary = stats.summary("http://x.com/", Duration::ZERO);
        assert_eq!(summary.urls_admitted, 20);
        assert_eq!(summary.duplicates_dropped, 8 * 20 - 20);
    }
}
