//! Crawl result types
//!
//! `CrawledPage` is one fetched and parsed document; `CrawledSite` is the
//! aggregate handed to downstream consumers. Both serialize with camelCase
//! keys so stored JSON keeps the shape the analysis pipeline reads.

use serde::{Deserialize, Serialize};

/// One fetched and parsed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawledPage {
    /// Canonical URL the page was fetched from
    pub url: String,

    /// Text of the first `<title>` (or first markdown heading), trimmed
    pub title: String,

    /// `h1`-`h4` texts in document order, each shorter than 150 characters
    pub headings: Vec<String>,

    /// Noise-stripped, whitespace-collapsed body text
    pub body_text: String,

    /// Whitespace-delimited token count of the body text
    pub word_count: usize,

    /// Same-origin links, deduplicated
    pub internal_links: Vec<String>,

    /// Cross-origin and `mailto:` links, deduplicated
    pub external_links: Vec<String>,

    /// Images found on the page
    #[serde(default)]
    pub images: Vec<SiteImage>,
}

impl CrawledPage {
    /// Length of the body text in characters
    pub fn body_chars(&self) -> usize {
        self.body_text.chars().count()
    }
}

/// An image reference with the layout region it was found in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteImage {
    pub url: String,
    pub alt: String,
    /// One of `header`, `hero`, `gallery`, `footer`, `content`
    pub context: String,
}

/// A service offering derived from a heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedService {
    pub name: String,
    pub description: String,
    pub page_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandInfo {
    pub business_name: String,
    pub tagline: Option<String>,
    pub primary_color: Option<String>,
    pub logo_url: Option<String>,
    pub favicon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub hours: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    pub title: String,
    pub description: String,
    pub og_image: Option<String>,
    /// First JSON-LD block, preferring a `*Business` type
    pub schema: Option<serde_json::Value>,
}

/// Everything learned about one business website
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawledSite {
    /// Normalized base URL
    pub url: String,
    /// Pages in crawl order; the first one is treated as the homepage
    pub pages: Vec<CrawledPage>,
    pub brand_info: BrandInfo,
    pub contact_info: ContactInfo,
    pub services: Vec<ExtractedService>,
    pub about_content: Option<String>,
    pub testimonials: Vec<String>,
    pub images: Vec<SiteImage>,
    pub tech_stack: Vec<String>,
    pub seo_meta: SeoMeta,
}

impl CrawledSite {
    /// The "no data available" sentinel for a base URL
    pub fn empty(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }

    /// Returns true if this is the empty sentinel
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The page treated as the homepage
    pub fn homepage(&self) -> Option<&CrawledPage> {
        self.pages.first()
    }
}
