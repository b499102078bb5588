use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Bizcrawl
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Crawl budgets and extraction limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages kept from the static crawl
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Maximum link depth from the base URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Wall-clock budget for the breadth-first phase (milliseconds)
    #[serde(rename = "crawl-timeout-ms")]
    pub crawl_timeout_ms: u64,

    /// Timeout for a single static page fetch (milliseconds)
    #[serde(rename = "page-timeout-ms")]
    pub page_timeout_ms: u64,

    /// Total body text below which the crawl is considered thin (characters)
    #[serde(rename = "thin-content-threshold")]
    pub thin_content_threshold: usize,

    /// Cap on stored body text per page (characters)
    #[serde(rename = "max-body-chars")]
    pub max_body_chars: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 20,
            max_depth: 2,
            crawl_timeout_ms: 30_000,
            page_timeout_ms: 8_000,
            thin_content_threshold: 500,
            max_body_chars: 10_000,
        }
    }
}

impl CrawlerConfig {
    pub fn crawl_timeout(&self) -> Duration {
        Duration::from_millis(self.crawl_timeout_ms)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }
}

/// Rendering proxy configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Whether the rendering fallback may be used at all
    pub enabled: bool,

    /// Prefix the target URL is appended to
    pub endpoint: String,

    /// Timeout for one rendering request (milliseconds)
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Maximum number of key sub-pages re-fetched through the proxy
    #[serde(rename = "max-subpages")]
    pub max_subpages: usize,

    /// Rendered markdown shorter than this is treated as a failure (characters)
    #[serde(rename = "min-content-chars")]
    pub min_content_chars: usize,

    /// Rendered sub-pages must carry more body text than this to be kept
    #[serde(rename = "min-subpage-chars")]
    pub min_subpage_chars: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://r.jina.ai/".to_string(),
            timeout_ms: 15_000,
            max_subpages: 4,
            min_content_chars: 50,
            min_subpage_chars: 100,
        }
    }
}

impl RenderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Builds the proxy URL for a target page
    pub fn proxy_url(&self, target: &str) -> String {
        format!("{}{}", self.endpoint, target)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "BizcrawlBot".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/bizcrawl/bizcrawl".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Format: Mozilla/5.0 (compatible; CrawlerName/Version; +ContactURL)
    pub fn header_value(&self) -> String {
        format!(
            "Mozilla/5.0 (compatible; {}/{}; +{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}
