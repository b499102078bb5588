//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop and the rendering
//! fallback policy:
//! - Draining the frontier under the page, depth and wall-clock budgets
//! - Coordinating fetching, parsing and link following
//! - Recording a `PageVisit` for every dequeued URL
//! - Re-fetching through the rendering proxy when static HTML is empty or thin

use crate::config::Config;
use crate::crawler::fetcher::fetch_html;
use crate::crawler::parser::parse_page;
use crate::crawler::render::try_render;
use crate::crawler::scheduler::{QueuedUrl, Scheduler};
use crate::site::CrawledPage;
use crate::state::{PageState, PageVisit};
use crate::url::{canonicalize, origin_of, resolve_url, should_skip_url};
use futures::future::join_all;
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use std::sync::{Arc, LazyLock};
use std::time::Instant;

static KEY_SUBPAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)service|about|contact").expect("hardcoded key sub-page pattern is valid")
});

/// Which rendering fallback path a crawl went through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderFallback {
    /// Static pages carried enough text
    NotNeeded,
    /// No static page survived; the rendered homepage was used instead
    RecoveredEmpty,
    /// Static text was thin; the rendered homepage replaced page 0
    RecoveredThin,
    /// The proxy was tried but produced no improvement
    Attempted,
}

/// Pages and diagnostics produced by one coordinator run
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub pages: Vec<CrawledPage>,
    pub visits: Vec<PageVisit>,
    pub render_fallback: RenderFallback,
}

impl CrawlOutcome {
    /// Sum of body text lengths across all pages, in characters
    pub fn total_body_chars(&self) -> usize {
        self.pages.iter().map(CrawledPage::body_chars).sum()
    }
}

/// Main crawler coordinator structure
///
/// A coordinator owns the frontier and visited set of exactly one crawl. It
/// is consumed by `run`, so crawl state can never leak into a second crawl.
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    base_url: String,
    scheduler: Scheduler,
    pages: Vec<CrawledPage>,
    visits: Vec<PageVisit>,
}

impl Coordinator {
    /// Creates a coordinator seeded with a normalized base URL
    pub fn new(config: Arc<Config>, client: Client, base_url: &str) -> Self {
        Self {
            config,
            client,
            base_url: base_url.to_string(),
            scheduler: Scheduler::new(base_url),
            pages: Vec::new(),
            visits: Vec::new(),
        }
    }

    /// Runs the breadth-first crawl followed by the rendering fallback policy
    pub async fn run(mut self) -> CrawlOutcome {
        tracing::info!("Starting crawl of {}", self.base_url);
        let start_time = Instant::now();

        self.crawl_static(start_time).await;

        tracing::info!(
            "Static crawl finished: {} pages, {} URLs dequeued in {:?}",
            self.pages.len(),
            self.visits.len(),
            start_time.elapsed()
        );

        let render_fallback = self.apply_render_fallback().await;

        CrawlOutcome {
            pages: self.pages,
            visits: self.visits,
            render_fallback,
        }
    }

    /// Drains the frontier until it empties or a budget is spent
    async fn crawl_static(&mut self, start_time: Instant) {
        let max_pages = self.config.crawler.max_pages;
        let crawl_timeout = self.config.crawler.crawl_timeout();

        while self.pages.len() < max_pages {
            if start_time.elapsed() > crawl_timeout {
                tracing::info!(
                    "Crawl time budget of {:?} exhausted with {} URLs still queued",
                    crawl_timeout,
                    self.scheduler.frontier_size()
                );
                break;
            }

            let Some((queued, canonical)) = self.scheduler.next_url() else {
                tracing::debug!("Frontier is empty, crawl complete");
                break;
            };

            self.process_url(&queued, canonical).await;
        }
    }

    /// Fetches and parses one dequeued URL, following its links if allowed
    async fn process_url(&mut self, queued: &QueuedUrl, canonical: String) {
        if should_skip_url(&canonical) {
            tracing::debug!("Skipping non-HTML resource {}", canonical);
            self.visits
                .push(PageVisit::new(canonical, queued.depth, PageState::SkippedAsset));
            return;
        }

        let fetched = match fetch_html(&self.client, &canonical).await {
            Ok(f) => f,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", canonical, e);
                self.visits.push(
                    PageVisit::new(canonical, queued.depth, e.page_state()).with_detail(e.to_string()),
                );
                return;
            }
        };

        let page = match parse_page(&canonical, &fetched.html, self.config.crawler.max_body_chars) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", canonical, e);
                self.visits.push(
                    PageVisit::new(canonical, queued.depth, PageState::Failed)
                        .with_detail(format!("Parse error: {}", e)),
                );
                return;
            }
        };

        if queued.depth < self.config.crawler.max_depth {
            self.handle_discovered_links(&page.internal_links, queued.depth + 1);
        }

        self.visits
            .push(PageVisit::new(canonical, queued.depth, PageState::Processed));
        self.pages.push(page);
    }

    /// Queues a page's internal links one level deeper
    fn handle_discovered_links(&mut self, links: &[String], depth: u32) {
        let Some(origin) = origin_of(&self.base_url) else {
            return;
        };

        for link in links {
            let Some(resolved) = resolve_url(link, &origin) else {
                continue;
            };
            self.scheduler.add_to_frontier(resolved, depth);
        }
    }

    /// Applies the zero-pages and thin-content recovery paths
    async fn apply_render_fallback(&mut self) -> RenderFallback {
        let max_body_chars = self.config.crawler.max_body_chars;

        if self.pages.is_empty() {
            tracing::info!("Static crawl produced no pages, trying rendering fallback");
            return match try_render(&self.client, &self.config.render, &self.base_url, max_body_chars)
                .await
            {
                Some(page) => {
                    tracing::info!(
                        "Rendering fallback recovered {} chars",
                        page.body_chars()
                    );
                    self.record_rendered(&page, 0);
                    self.pages.push(page);
                    RenderFallback::RecoveredEmpty
                }
                None => RenderFallback::Attempted,
            };
        }

        let total: usize = self.pages.iter().map(CrawledPage::body_chars).sum();
        if total >= self.config.crawler.thin_content_threshold {
            return RenderFallback::NotNeeded;
        }

        tracing::info!(
            "Thin content detected ({} chars across {} pages), trying rendering fallback",
            total,
            self.pages.len()
        );

        let Some(homepage) =
            try_render(&self.client, &self.config.render, &self.base_url, max_body_chars).await
        else {
            return RenderFallback::Attempted;
        };

        if homepage.body_chars() <= total {
            tracing::info!(
                "Rendered homepage ({} chars) is no improvement over {} chars",
                homepage.body_chars(),
                total
            );
            return RenderFallback::Attempted;
        }

        tracing::info!(
            "Rendering recovered {} chars (was {})",
            homepage.body_chars(),
            total
        );

        let subpage_urls = self.key_subpage_urls(&homepage);
        self.record_rendered(&homepage, 0);
        self.pages[0] = homepage;

        let renders = subpage_urls
            .iter()
            .map(|url| try_render(&self.client, &self.config.render, url, max_body_chars));
        let rendered: Vec<Option<CrawledPage>> = join_all(renders).await;

        for page in rendered.into_iter().flatten() {
            if page.body_chars() <= self.config.render.min_subpage_chars {
                tracing::debug!("Dropping thin rendered sub-page {}", page.url);
                continue;
            }
            self.record_rendered(&page, 1);
            self.merge_page(page);
        }

        RenderFallback::RecoveredThin
    }

    /// Internal links of the rendered homepage whose path looks like a key page
    fn key_subpage_urls(&self, homepage: &CrawledPage) -> Vec<String> {
        homepage
            .internal_links
            .iter()
            .filter(|link| {
                ::url::Url::parse(link)
                    .map(|u| KEY_SUBPAGE.is_match(u.path()))
                    .unwrap_or(false)
            })
            .take(self.config.render.max_subpages)
            .cloned()
            .collect()
    }

    /// Replaces the page with the same canonical URL, or appends
    fn merge_page(&mut self, page: CrawledPage) {
        let key = canonicalize(&page.url);
        match self.pages.iter().position(|p| canonicalize(&p.url) == key) {
            Some(idx) => self.pages[idx] = page,
            None => self.pages.push(page),
        }
    }

    fn record_rendered(&mut self, page: &CrawledPage, depth: u32) {
        self.visits.push(
            PageVisit::new(canonicalize(&page.url), depth, PageState::Rendered)
                .with_detail(format!("{} chars", page.body_chars())),
        );
    }
}
