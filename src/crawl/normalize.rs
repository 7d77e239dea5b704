// src/crawl/normalize.rs
// =============================================================================
// Turns the raw href values found on a page into absolute URLs.
//
// Every URL that enters the frontier goes through here first, so the dedup
// filter only ever compares absolute URL strings.
//
// How it works:
// 1. Parse the page URL (the base). It must be absolute.
// 2. Sanity-check the href as a URI reference.
// 3. Resolve the href against the base (RFC 3986 section 5) with url::Url::join
//
// Examples:
//   base = "http://x.com/dir/page1.html"
//   href = "page2.html"        -> "http://x.com/dir/page2.html"
//   href = "/a/b"              -> "http://x.com/a/b"
//   href = "//cdn.x.com/app.js" -> "http://cdn.x.com/app.js"
//   href = "#top"              -> "http://x.com/dir/page1.html#top"
//   href = "http://y.com/z"    -> "http://y.com/z" (base ignored)
// =============================================================================

use url::Url;

use crate::error::CrawlError;

/// Resolves `href` against `base` and returns the absolute URL as a string.
///
/// Fails with `CrawlError::MalformedUrl` when either side cannot be parsed.
pub fn normalize(href: &str, base: &str) -> Result<String, CrawlError> {
    let base_url = Url::parse(base).map_err(|e| CrawlError::malformed(base, e))?;

    // Attribute values often carry stray whitespace around the URL
    let href = href.trim();
    validate_reference(href)?;

    let resolved = base_url
        .join(href)
        .map_err(|e| CrawlError::malformed(href, e))?;

    Ok(resolved.to_string())
}

// Rejects references that are not valid URI references even though the url
// crate would happily treat them as odd-looking relative paths.
fn validate_reference(href: &str) -> Result<(), CrawlError> {
    if href.chars().any(|c| c.is_ascii_control()) {
        return Err(CrawlError::malformed(href, "contains a control character"));
    }

    if has_scheme(href) {
        return Ok(());
    }

    // A relative-path reference may not have a colon in its first segment,
    // otherwise it would be read as a scheme (RFC 3986 section 4.2)
    let first_segment = href
        .split(|c: char| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or("");
    if first_segment.contains(':') {
        return Err(CrawlError::malformed(
            href,
            "first path segment in a relative reference cannot contain a colon",
        ));
    }

    Ok(())
}

// scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) followed by ':'
fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}
