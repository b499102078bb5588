//! Output module for presenting crawl results
//!
//! This module handles:
//! - Rendering a crawled site as a markdown brief or JSON
//! - Summarizing and printing crawl diagnostics

mod markdown;
pub mod stats;

pub use markdown::format_site_markdown;
pub use stats::{print_statistics, CrawlStatistics};

use crate::site::CrawledSite;
use crate::CrawlError;

/// Output format for a crawled site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

/// Renders a site in the requested format
///
/// # Returns
///
/// * `Ok(String)` - The rendered document
/// * `Err(CrawlError)` - JSON serialization failed
pub fn render_site(site: &CrawledSite, format: OutputFormat) -> Result<String, CrawlError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(site)?),
        OutputFormat::Markdown => Ok(format_site_markdown(site)),
    }
}
