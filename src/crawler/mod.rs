//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of static pages
//! - HTML and rendered-markdown parsing
//! - Breadth-first frontier scheduling
//! - Overall crawl coordination and the rendering fallback
//! - Assembly of the final site record

mod assembler;
mod coordinator;
mod fetcher;
mod markdown;
mod parser;
mod profile;
mod render;
mod scheduler;

pub use assembler::assemble_site;
pub use coordinator::{Coordinator, CrawlOutcome, RenderFallback};
pub use fetcher::{build_http_client, fetch_html, is_html_content_type, FetchError, FetchedHtml};
pub use markdown::{parse_markdown, strip_markdown};
pub use parser::{parse_page, MAX_HEADING_CHARS};
pub use profile::{profile_markup, HomepageProfile};
pub use render::{render_page, RenderError};
pub use scheduler::{QueuedUrl, Scheduler};

use crate::config::{validate, Config};
use crate::site::CrawledSite;
use crate::state::PageVisit;
use crate::url::normalize_base_url;
use crate::CrawlError;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Everything one crawl produced, including diagnostics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlReport {
    pub site: CrawledSite,
    /// One entry per dequeued URL and per rendered page, in processing order
    pub visits: Vec<PageVisit>,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub render_fallback: RenderFallback,
}

/// Website crawler bound to one configuration and HTTP client
///
/// The crawler itself holds no per-crawl state, so one instance can run
/// many crawls, including concurrently.
#[derive(Debug, Clone)]
pub struct SiteCrawler {
    config: Arc<Config>,
    client: Client,
}

impl SiteCrawler {
    /// Validates the configuration and builds the crawler's HTTP client
    pub fn new(config: Config) -> Result<Self, CrawlError> {
        validate(&config)?;
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Crawls a business website and extracts everything it can
    ///
    /// Never fails: unreachable sites, invalid URLs and empty pages produce
    /// the empty `CrawledSite` sentinel inside the report.
    pub async fn crawl(&self, url: &str) -> CrawlReport {
        let started_at = Utc::now();
        let start_time = Instant::now();

        let base_url = match normalize_base_url(url) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!("Cannot crawl {:?}: {}", url, e);
                return CrawlReport {
                    site: CrawledSite::empty(url.trim()),
                    visits: Vec::new(),
                    started_at,
                    elapsed_ms: 0,
                    render_fallback: RenderFallback::NotNeeded,
                };
            }
        };

        let outcome = Coordinator::new(Arc::clone(&self.config), self.client.clone(), &base_url)
            .run()
            .await;

        let site = if outcome.total_body_chars() == 0 {
            tracing::info!("No usable content found for {}", base_url);
            CrawledSite::empty(&base_url)
        } else {
            let homepage = match fetch_html(&self.client, &base_url).await {
                Ok(fetched) => Some(fetched),
                Err(e) => {
                    tracing::debug!("Homepage re-fetch failed for {}: {}", base_url, e);
                    None
                }
            };
            assemble_site(&base_url, outcome.pages, homepage.as_ref())
        };

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        tracing::info!(
            "Crawl of {} finished: {} pages in {} ms",
            base_url,
            site.pages.len(),
            elapsed_ms
        );

        CrawlReport {
            site,
            visits: outcome.visits,
            started_at,
            elapsed_ms,
            render_fallback: outcome.render_fallback,
        }
    }

    /// Crawls a website and returns only the site record
    pub async fn crawl_site(&self, url: &str) -> CrawledSite {
        self.crawl(url).await.site
    }

    /// Profiles a single homepage without crawling further
    pub async fn profile_homepage(&self, url: &str) -> Result<HomepageProfile, FetchError> {
        let base_url = normalize_base_url(url)?;
        let fetched = fetch_html(&self.client, &base_url).await?;
        Ok(profile_markup(
            &fetched.final_url,
            &fetched.html,
            self.config.crawler.max_body_chars,
        )?)
    }

    /// Profiles several homepages concurrently; a failed profile is `None`
    pub async fn profile_competitors(&self, urls: &[String]) -> Vec<Option<HomepageProfile>> {
        let profiles = urls.iter().map(|url| async move {
            match self.profile_homepage(url).await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("Failed to profile {}: {}", url, e);
                    None
                }
            }
        });
        join_all(profiles).await
    }
}

/// Crawls a website with the default configuration
///
/// This is the main entry point for one-off crawls. It never fails; when no
/// data can be gathered the empty sentinel is returned.
///
/// # Example
///
/// ```no_run
/// # async fn demo() {
/// let site = bizcrawl::crawl_website("acme-plumbing.com").await;
/// if site.is_empty() {
///     println!("no data available");
/// }
/// # }
/// ```
pub async fn crawl_website(url: &str) -> CrawledSite {
    match SiteCrawler::new(Config::default()) {
        Ok(crawler) => crawler.crawl_site(url).await,
        Err(e) => {
            tracing::error!("Failed to build crawler: {}", e);
            CrawledSite::empty(url.trim())
        }
    }
}
