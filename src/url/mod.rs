//! URL handling module for Bizcrawl
//!
//! This module provides base-URL normalization, href resolution, canonical
//! crawl keys, origin classification and asset filtering.

mod domain;
mod filter;
mod normalize;
mod resolve;

// Re-export main functions
pub use domain::is_same_origin;
pub use filter::should_skip_url;
pub use normalize::{canonicalize, normalize_base_url};
pub use resolve::resolve_url;

use url::Url;

/// Internal and external links found on one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLinks {
    /// Same-origin links, deduplicated, in first-seen order
    pub internal: Vec<String>,
    /// Everything else (including `mailto:`), deduplicated, in first-seen order
    pub external: Vec<String>,
}

impl ClassifiedLinks {
    /// Resolves and classifies one href; unresolvable hrefs are dropped
    pub fn push_href(&mut self, href: &str, origin: &Url) {
        let Some(resolved) = resolve_url(href, origin) else {
            return;
        };

        let bucket = if is_same_origin(&resolved, origin) {
            &mut self.internal
        } else {
            &mut self.external
        };

        if !bucket.contains(&resolved) {
            bucket.push(resolved);
        }
    }
}

/// Returns the origin (`scheme://host[:port]`) of a page URL as a base for resolution
pub fn origin_of(page_url: &str) -> Option<Url> {
    let url = Url::parse(page_url).ok()?;
    if !url.origin().is_tuple() {
        return None;
    }
    Url::parse(&url.origin().ascii_serialization()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_of_drops_path() {
        let origin = origin_of("https://example.com/about/team?x=1").unwrap();
        assert_eq!(origin.as_str(), "https://example.com/");
    }

    #[test]
    fn test_origin_of_keeps_port() {
        let origin = origin_of("http://127.0.0.1:4000/a").unwrap();
        assert_eq!(origin.as_str(), "http://127.0.0.1:4000/");
    }

    #[test]
    fn test_origin_of_rejects_opaque() {
        assert!(origin_of("mailto:a@b.com").is_none());
        assert!(origin_of("not a url").is_none());
    }

    #[test]
    fn test_classified_links_dedup_and_split() {
        let origin = origin_of("https://example.com/").unwrap();
        let mut links = ClassifiedLinks::default();

        links.push_href("/services", &origin);
        links.push_href("/services#top", &origin);
        links.push_href("https://facebook.com/acme", &origin);
        links.push_href("mailto:info@example.com", &origin);
        links.push_href("javascript:void(0)", &origin);

        assert_eq!(links.internal, vec!["https://example.com/services"]);
        assert_eq!(
            links.external,
            vec!["https://facebook.com/acme", "mailto:info@example.com"]
        );
    }
}
