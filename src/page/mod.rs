// src/page/mod.rs
// =============================================================================
// Everything the crawler does with a single page.
//
// Submodules:
// - http: builds the shared HTTP client and fetches page bodies
// - html: pulls raw href values out of a page body
//
// The crawl workers (src/crawl/worker.rs) glue these together.
// =============================================================================

mod html;
mod http;

pub use html::extract_hrefs;
pub use http::{build_client, fetch_page};
