// src/page/html.rs
// =============================================================================
// This module pulls raw href values out of an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Nothing here resolves or filters URLs. The hrefs come back exactly as the
// page wrote them ("/docs", "../a.html", "mailto:me@x.com", ...) and the
// crawl workers normalize them afterwards.
// =============================================================================

use std::sync::OnceLock;

use scraper::{Html, Selector};

// Every <a> tag that has an href attribute
fn anchor_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| match Selector::parse("a[href]") {
        Ok(selector) => selector,
        // The selector is a constant, so this is a programmer error
        Err(e) => panic!("invalid anchor selector: {:?}", e),
    })
}

// Extracts every href value from the page, in document order
//
// Parameters:
//   html: the page body
//
// Returns: Vec<String> of raw href strings (duplicates kept)
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(anchor_selector())
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        assert_eq!(extract_hrefs(html), vec!["https://www.rust-lang.org"]);
    }

    #[test]
    fn test_relative_links_are_left_alone() {
        let html = r#"<a href="/docs">Docs</a><a href="../about">About</a>"#;
        assert_eq!(extract_hrefs(html), vec!["/docs", "../about"]);
    }

    #[test]
    fn test_keeps_other_schemes_and_duplicates() {
        let html = r#"
            <a href="mailto:test@example.com">Email</a>
            <a href="/docs">Docs</a>
            <a href="/docs">Docs again</a>
        "#;
        assert_eq!(
            extract_hrefs(html),
            vec!["mailto:test@example.com", "/docs", "/docs"]
        );
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let html = r#"<a name="top">Top</a><link href="/style.css"><a href="">Self</a>"#;
        assert_eq!(extract_hrefs(html), vec![""]);
    }

    #[test]
    fn test_garbage_input_yields_nothing() {
        assert!(extract_hrefs("not html at all <<<").is_empty());
    }
}
