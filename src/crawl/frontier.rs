// src/crawl/frontier.rs
// =============================================================================
// The frontier: where discovered URLs wait to be deduplicated.
//
// It is an unbounded tokio channel. A single page can link to hundreds of
// URLs, and the workers that push those URLs are the same workers that drain
// the pipeline. With a fixed-capacity queue every worker could end up stuck
// in send() with nobody left to receive.
//
// Submitting a URL always counts it with the termination detector first, so
// the detector can never see an empty pipeline while a URL is on its way in.
// =============================================================================

use std::sync::Arc;

use log::trace;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::termination::TerminationDetector;

/// Cloneable handle used by workers (and the engine, for the seed) to submit URLs.
#[derive(Debug, Clone)]
pub struct Frontier {
    sender: UnboundedSender<String>,
    detector: Arc<TerminationDetector>,
}

impl Frontier {
    /// Creates the frontier and returns the receiving end for the dedup filter.
    pub fn new(detector: Arc<TerminationDetector>) -> (Self, UnboundedReceiver<String>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender, detector }, receiver)
    }

    /// Queues an absolute URL for deduplication.
    pub fn submit(&self, url: String) {
        self.detector.task_queued();
        trace!("frontier <- {}", url);

        // Sending only fails once the dedup filter has stopped, which happens
        // after quiescence; undo the count so the books still balance
        if self.sender.send(url).is_err() {
            self.detector.task_finished();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_counts_in_flight() {
        let detector = Arc::new(TerminationDetector::new());
        let (frontier, mut receiver) = Frontier::new(Arc::clone(&detector));

        frontier.submit("http://x.com/".to_string());
        frontier.submit("http://x.com/a".to_string());

        assert_eq!(detector.in_flight(), 2);
        assert_eq!(receiver.recv().await.as_deref(), Some("http://x.com/"));
        assert_eq!(receiver.recv().await.as_deref(), Some("http://x.com/a"));
    }

    #[test]
    fn test_submit_after_receiver_dropped_keeps_counter_balanced() {
        let detector = Arc::new(TerminationDetector::new());
        let (frontier, receiver) = Frontier::new(Arc::clone(&detector));
        drop(receiver);

        frontier.submit("http://x.com/".to_string());
        assert_eq!(detector.in_flight(), 0);
    }
}
