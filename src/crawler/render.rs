//! Rendering-proxy fallback
//!
//! Client-rendered sites often serve an empty HTML shell. The proxy executes
//! the page's JavaScript and answers with readable markdown, which is turned
//! into a `CrawledPage` by `parse_markdown`.

use crate::config::RenderConfig;
use crate::crawler::markdown::parse_markdown;
use crate::site::CrawledPage;
use reqwest::header::ACCEPT;
use reqwest::Client;
use thiserror::Error;

/// Why the rendering proxy produced no page
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Rendering disabled")]
    Disabled,

    #[error("Proxy returned HTTP {status}")]
    Status { status: u16 },

    #[error("Rendered content too short ({chars} chars)")]
    MinimalContent { chars: usize },

    #[error("Proxy request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid page URL: {0}")]
    Url(#[from] crate::UrlError),
}

/// Fetches one page through the rendering proxy
///
/// # Arguments
///
/// * `client` - Shared HTTP client; the render timeout overrides the page timeout
/// * `config` - Proxy endpoint and thresholds
/// * `url` - The page to render
/// * `max_body_chars` - Cap on the stored body text
///
/// # Returns
///
/// * `Ok(CrawledPage)` - Rendered page built from the proxy's markdown
/// * `Err(RenderError)` - Non-2xx answer, content under the minimum, or transport failure
pub async fn render_page(
    client: &Client,
    config: &RenderConfig,
    url: &str,
    max_body_chars: usize,
) -> Result<CrawledPage, RenderError> {
    if !config.enabled {
        return Err(RenderError::Disabled);
    }

    let response = client
        .get(config.proxy_url(url))
        .header(ACCEPT, "text/markdown")
        .header("X-Return-Format", "markdown")
        .timeout(config.timeout())
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(RenderError::Status {
            status: status.as_u16(),
        });
    }

    let markdown = response.text().await?;
    let chars = markdown.chars().count();
    if chars < config.min_content_chars {
        return Err(RenderError::MinimalContent { chars });
    }

    Ok(parse_markdown(url, &markdown, max_body_chars)?)
}

/// Like `render_page`, but logs the failure and returns `None`
///
/// Rendering failures never abort a crawl; they only mean no improvement
/// was available.
pub async fn try_render(
    client: &Client,
    config: &RenderConfig,
    url: &str,
    max_body_chars: usize,
) -> Option<CrawledPage> {
    match render_page(client, config, url, max_body_chars).await {
        Ok(page) => {
            tracing::debug!("Rendered {} ({} chars)", url, page.body_chars());
            Some(page)
        }
        Err(RenderError::Disabled) => None,
        Err(e) => {
            tracing::warn!("Rendering fallback failed for {}: {}", url, e);
            None
        }
    }
}
