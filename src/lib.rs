//! Bizcrawl: a website crawler and content-extraction engine
//!
//! This crate crawls a small business website under strict page, depth and
//! time budgets, falls back to a rendering proxy when static HTML is too thin,
//! and extracts structured sales intelligence (services, contact details,
//! testimonials, brand, SEO metadata and tech stack) from what it finds.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod site;
pub mod state;
pub mod url;

mod text;

use thiserror::Error;

/// Main error type for Bizcrawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Bizcrawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl_website, CrawlReport, SiteCrawler};
pub use extract::{extract_contact_info, extract_services};
pub use site::{CrawledPage, CrawledSite, ExtractedService};
pub use state::PageState;
pub use url::{canonicalize, resolve_url, should_skip_url};
