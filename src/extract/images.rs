//! Site-wide image aggregation

use crate::site::{CrawledPage, SiteImage};
use std::collections::HashSet;

/// Maximum number of images reported for one site
pub const MAX_SITE_IMAGES: usize = 40;

/// Collects page images in crawl order, deduplicated by URL
pub fn extract_images(pages: &[CrawledPage]) -> Vec<SiteImage> {
    let mut seen: HashSet<&str> = HashSet::new();

    pages
        .iter()
        .flat_map(|page| page.images.iter())
        .filter(|image| seen.insert(image.url.as_str()))
        .take(MAX_SITE_IMAGES)
        .cloned()
        .collect()
}
