// src/page/http.rs
// =============================================================================
// This module fetches pages over HTTP(S).
//
// Key functionality:
// - Builds the one reqwest Client every worker shares
// - GETs a page and returns its body as text
// - Turns every way a fetch can go wrong into a CrawlError::FetchFailure
//
// Transport policy:
// - Every request has an explicit timeout (a fetch never hangs forever)
// - TLS certificate verification is OFF. Sites with self-signed or expired
//   certificates are crawled like any other site. This is intentional.
// - Redirects are followed up to config::MAX_REDIRECTS
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - Result<T, E>: For error handling
// =============================================================================

use std::time::Duration;

use reqwest::Client;

use crate::config::{MAX_REDIRECTS, USER_AGENT};
use crate::error::CrawlError;

// Builds the HTTP client shared by all workers
//
// Client is cheap to clone (it's an Arc internally) and pools connections,
// so one client for the whole crawl is what we want.
//
// Accepting invalid certificates has no end-to-end test: that needs an HTTPS
// server with a self-signed certificate, and mockito only speaks plain HTTP.
// test_client_builds_with_every_policy below covers the builder settings.
pub fn build_client(timeout: Duration) -> Result<Client, CrawlError> {
    let client = Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .danger_accept_invalid_certs(true)
        .build()?;
    Ok(client)
}

// Fetches a web page and returns its body
//
// Anything other than a 2xx response counts as a failure. The caller drops
// the page; there are no retries.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, CrawlError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| categorize_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::FetchFailure {
            url: url.to_string(),
            reason: format!("HTTP {}", status.as_u16()),
        });
    }

    response.text().await.map_err(|e| categorize_error(url, e))
}

// Categorizes the reqwest error types into a short human-readable reason
//
// Only used for debug logs, but it makes "why was this page missing?" much
// easier to answer when running with --log-level debug.
fn categorize_error(url: &str, error: reqwest::Error) -> CrawlError {
    let reason = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else if error.is_body() || error.is_decode() {
        format!("could not read body: {}", error)
    } else {
        error.to_string()
    };

    CrawlError::FetchFailure {
        url: url.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_page_returns_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/index.html")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<a href=\"/next\">next</a>")
            .expect(1)
            .create_async()
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let body = fetch_page(&client, &format!("{}/index.html", server.url()))
            .await
            .unwrap();
        assert!(body.contains("/next"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let result = fetch_page(&client, &format!("{}/missing", server.url())).await;

        match result {
            Err(CrawlError::FetchFailure { reason, .. }) => assert_eq!(reason, "HTTP 404"),
            other => panic!("expected a fetch failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_client_builds_with_every_policy() {
        // Fails at build() if the TLS backend rejects the lenient settings
        let client = build_client(Duration::from_millis(250));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_redirects_are_followed() {
        let mut server = Server::new_async().await;
        let _moved = server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", "/new")
            .create_async()
            .await;
        let _new = server
            .mock("GET", "/new")
            .with_status(200)
            .with_body("<p>moved here</p>")
            .expect(1)
            .create_async()
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let body = fetch_page(&client, &format!("{}/old", server.url()))
            .await
            .unwrap();
        assert_eq!(body, "<p>moved here</p>");
    }

    #[tokio::test]
    async fn test_connection_refused_is_a_failure() {
        let client = build_client(Duration::from_secs(2)).unwrap();
        // Port 9 (discard) on loopback is almost never listening
        let result = fetch_page(&client, "http://127.0.0.1:9/").await;
        assert!(matches!(result, Err(CrawlError::FetchFailure { .. })));
    }
}
