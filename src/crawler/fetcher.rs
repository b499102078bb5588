//! HTTP fetcher implementation
//!
//! This module handles all static page requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests that follow redirects and require an HTML Content-Type
//! - Capturing response headers for tech-stack detection
//! - Classifying failures into diagnostic page states
//!
//! There is deliberately no retry logic: one failed request means the page
//! contributed nothing.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::state::PageState;
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE};
use reqwest::{redirect::Policy, Client};
use std::collections::HashMap;
use thiserror::Error;

/// Why a static fetch produced no page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status}")]
    Status { status: u16 },

    #[error("Not HTML: {content_type}")]
    ContentMismatch { content_type: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] crate::UrlError),
}

impl FetchError {
    /// Maps the failure onto the page state recorded in crawl diagnostics
    pub fn page_state(&self) -> PageState {
        match self {
            Self::Status { status: 404 | 410 } => PageState::DeadLink,
            Self::Status { status: 429 } => PageState::RateLimited,
            Self::Status { .. } => PageState::HttpError,
            Self::ContentMismatch { .. } => PageState::ContentMismatch,
            Self::Timeout | Self::Connect(_) => PageState::Unreachable,
            Self::Transport(_) | Self::InvalidUrl(_) => PageState::Failed,
        }
    }

    fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_connect() {
            Self::Connect(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// A successfully fetched HTML document
#[derive(Debug, Clone)]
pub struct FetchedHtml {
    /// Final URL after redirects
    pub final_url: String,
    /// Raw response body
    pub html: String,
    /// Response headers, lower-cased names
    pub headers: HashMap<String, String>,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - Crawl budgets; the page timeout becomes the client timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use bizcrawl::config::{CrawlerConfig, UserAgentConfig};
/// use bizcrawl::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(crawler.page_timeout())
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its HTML with the response headers
///
/// # Request Flow
///
/// | Condition | Result |
/// |-----------|--------|
/// | Redirect | Followed (max 10 hops) |
/// | Non-2xx status | `FetchError::Status` |
/// | Content-Type without `text/html`/`xhtml` | `FetchError::ContentMismatch` |
/// | Timeout | `FetchError::Timeout` |
/// | Connection refused / DNS | `FetchError::Connect` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_html(client: &Client, url: &str) -> Result<FetchedHtml, FetchError> {
    let response = client
        .get(url)
        .header(ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await
        .map_err(FetchError::from_reqwest)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_html_content_type(&content_type) {
        return Err(FetchError::ContentMismatch { content_type });
    }

    let final_url = response.url().to_string();
    let headers = capture_headers(response.headers());
    let html = response.text().await.map_err(FetchError::from_reqwest)?;

    Ok(FetchedHtml {
        final_url,
        html,
        headers,
    })
}

/// Returns true for `text/html` and XHTML content types
pub fn is_html_content_type(content_type: &str) -> bool {
    let lower = content_type.to_ascii_lowercase();
    lower.contains("text/html") || lower.contains("xhtml")
}

/// Copies response headers into a plain map; repeated headers are joined with ", "
fn capture_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut captured: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        captured
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    captured
}
