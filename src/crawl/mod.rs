// src/crawl/mod.rs
// =============================================================================
// This module is the concurrent crawl engine.
//
// Features:
// - Breadth-first discovery starting from a seed URL
// - Exactly one fetch per distinct absolute URL
// - A fixed pool of fetch/parse workers
// - Clean shutdown once no work is left anywhere in the pipeline
//
// Submodules:
// - normalize: resolves hrefs into absolute URLs
// - frontier: unbounded queue of URLs waiting for deduplication
// - dedup: the single-owner filter that admits each URL once
// - worker: the fetch/parse loop
// - termination: in-flight accounting and the Running/Quiescent state
// - stats: counters and the end-of-crawl summary
// - engine: wires all of the above together
// =============================================================================

mod dedup;
mod engine;
mod frontier;
mod normalize;
mod stats;
mod termination;
mod worker;

pub use engine::crawl;
pub use stats::CrawlSummary;
