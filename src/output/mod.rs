// src/output/mod.rs
// =============================================================================
// Where crawl results end up.
//
// Submodules:
// - sink: formats page results and writes them to the console and the file
// - naming: builds the results file name and creates the file
// =============================================================================

mod naming;
mod sink;

pub use naming::create_output_file;
pub use sink::{PageResult, ResultSink};
