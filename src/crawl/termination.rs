// src/crawl/termination.rs
// =============================================================================
// Decides when the crawl is finished.
//
// "The queue is empty" is not enough: a worker that is still parsing a page
// is about to push more URLs. Instead we count every URL from the moment it
// is submitted to the frontier until it has been fully dealt with:
//
//   submitted --(dedup drops it)----------------------------> finished
//   submitted --(admitted, fetched, links submitted)--------> finished
//   submitted --(admitted, fetch failed)---------------------> finished
//
// A worker submits (and counts) all the links it found BEFORE it marks its
// own URL finished, so the counter can only reach zero once there is truly
// nothing left anywhere in the pipeline. When that happens the detector
// switches from Running to Quiescent and never goes back.
//
// Rust concepts:
// - AtomicUsize: a counter many tasks can change without a lock
// - tokio::sync::watch: a channel that always holds the latest value, so a
//   late subscriber still sees that the crawl is already Quiescent
// - RAII guards: TaskGuard marks a URL finished and FetchGuard decrements
//   the active-fetch gauge when dropped, even if the worker task panics
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use tokio::sync::watch;

/// The two states of a crawl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlState {
    /// Work may still be in flight
    Running,
    /// Nothing queued, nothing being fetched; terminal
    Quiescent,
}

/// Tracks in-flight URLs and announces quiescence.
#[derive(Debug)]
pub struct TerminationDetector {
    in_flight: AtomicUsize,
    active_fetches: AtomicUsize,
    state: watch::Sender<CrawlState>,
}

impl TerminationDetector {
    pub fn new() -> Self {
        let (state, _) = watch::channel(CrawlState::Running);
        Self {
            in_flight: AtomicUsize::new(0),
            active_fetches: AtomicUsize::new(0),
            state,
        }
    }

    /// Counts a URL that is about to be handed to the frontier.
    pub fn task_queued(&self) {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
    }

    /// Marks a previously queued URL as fully handled.
    ///
    /// The call that brings the counter to zero flips the state to Quiescent.
    pub fn task_finished(&self) {
        let previous = self.in_flight.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "task_finished called more often than task_queued");

        if previous == 1 {
            debug_assert_eq!(self.active_fetches.load(Ordering::SeqCst), 0);
            debug!("no work left in flight, crawl is quiescent");
            self.state.send_replace(CrawlState::Quiescent);
        }
    }

    /// Claims a queued URL for a worker; dropping the guard marks it finished.
    ///
    /// The drop also runs while a panicking task unwinds, so one bad page
    /// cannot keep the counter above zero forever.
    pub fn claim_task(&self) -> TaskGuard<'_> {
        TaskGuard { detector: self }
    }

    /// Registers a fetch in progress until the returned guard is dropped.
    pub fn fetch_started(&self) -> FetchGuard<'_> {
        self.active_fetches.fetch_add(1, Ordering::SeqCst);
        FetchGuard { detector: self }
    }

    /// URLs submitted but not yet finished.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Workers currently inside a fetch/parse cycle.
    pub fn active_fetches(&self) -> usize {
        self.active_fetches.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> CrawlState {
        *self.state.borrow()
    }

    /// Resolves once the crawl is Quiescent (immediately if it already is).
    pub async fn wait_quiescent(&self) {
        let mut receiver = self.state.subscribe();
        // The sender lives in self, so the channel cannot close while we wait
        let _ = receiver
            .wait_for(|state| *state == CrawlState::Quiescent)
            .await;
    }
}

impl Default for TerminationDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Held by a worker from the moment it takes a URL off the queue.
pub struct TaskGuard<'a> {
    detector: &'a TerminationDetector,
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        self.detector.task_finished();
    }
}

/// Held by a worker for the duration of one fetch/parse cycle.
pub struct FetchGuard<'a> {
    detector: &'a TerminationDetector,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.detector.active_fetches.fetch_sub(1, Ordering::SeqCst);
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why SeqCst everywhere?
//    - The counter is touched by the frontier, the dedup actor and every
//      worker; SeqCst gives all of them one agreed order of updates
//    - It is a handful of atomic ops per page, far below the cost of a fetch
//
// 2. What is send_replace?
//    - watch::Sender::send fails when nobody is subscribed
//    - send_replace always stores the value, so a subscriber that shows up
//      later still reads Quiescent
// -----------------------------------------------------------------------------
