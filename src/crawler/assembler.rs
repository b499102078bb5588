//! Site assembly: composing crawled pages and homepage markup into a `CrawledSite`

use crate::crawler::fetcher::FetchedHtml;
use crate::extract::{
    default_brand_info, default_seo_meta, detect_tech_stack, extract_about_content,
    extract_brand_info, extract_contact_info, extract_hours, extract_images, extract_seo_meta,
    extract_services, extract_testimonials,
};
use crate::site::{CrawledPage, CrawledSite};
use crate::url::origin_of;
use scraper::Html;

/// Runs every extractor and composes the final site record
///
/// # Arguments
///
/// * `base_url` - Normalized base URL of the crawl
/// * `pages` - Pages in crawl order; the first is the homepage
/// * `homepage` - Raw homepage fetch, if the re-fetch succeeded
///
/// Without homepage markup, brand and SEO fall back to values derived from
/// the first page's title and the tech stack is empty. Pages without any
/// body text produce the empty sentinel.
pub fn assemble_site(
    base_url: &str,
    pages: Vec<CrawledPage>,
    homepage: Option<&FetchedHtml>,
) -> CrawledSite {
    let total_chars: usize = pages.iter().map(CrawledPage::body_chars).sum();
    if total_chars == 0 {
        tracing::info!("No body text recovered for {}, returning empty result", base_url);
        return CrawledSite::empty(base_url);
    }

    let services = extract_services(&pages);
    let about_content = extract_about_content(&pages);
    let mut contact_info = extract_contact_info(&pages);
    contact_info.hours = extract_hours(&pages);
    let testimonials = extract_testimonials(&pages);
    let images = extract_images(&pages);

    let markup = homepage.and_then(|fetched| {
        origin_of(base_url).map(|origin| (Html::parse_document(&fetched.html), origin, fetched))
    });

    let (brand_info, seo_meta, tech_stack) = match markup {
        Some((document, origin, fetched)) => (
            extract_brand_info(&document, &origin),
            extract_seo_meta(&document),
            detect_tech_stack(&document, &fetched.headers),
        ),
        None => (
            default_brand_info(pages.first()),
            default_seo_meta(pages.first()),
            Vec::new(),
        ),
    };

    tracing::debug!(
        "Assembled {}: {} pages, {} services, {} testimonials, {} images",
        base_url,
        pages.len(),
        services.len(),
        testimonials.len(),
        images.len()
    );

    CrawledSite {
        url: base_url.to_string(),
        pages,
        brand_info,
        contact_info,
        services,
        about_content,
        testimonials,
        images,
        tech_stack,
        seo_meta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn page(url: &str, title: &str, headings: &[&str], body: &str) -> CrawledPage {
        CrawledPage {
            url: url.to_string(),
            title: title.to_string(),
            headings: headings.iter().map(|h| h.to_string()).collect(),
            body_text: body.to_string(),
            word_count: body.split_whitespace().count(),
            internal_links: vec![],
            external_links: vec![],
            images: vec![],
        }
    }

    #[test]
    fn test_zero_text_is_empty_sentinel() {
        let pages = vec![page("https://acme.com/", "Acme", &[], "")];
        let site = assemble_site("https://acme.com", pages, None);
        assert_eq!(site, CrawledSite::empty("https://acme.com"));
    }

    #[test]
    fn test_defaults_without_homepage_markup() {
        let pages = vec![page(
            "https://acme.com/",
            "Acme Plumbing - Springfield",
            &["Our Services", "Drain Cleaning"],
            "Our Services Drain Cleaning Fast and clean. Call 555-123-4567. Open Monday to Friday 8am to 6pm.",
        )];
        let site = assemble_site("https://acme.com", pages, None);

        assert_eq!(site.brand_info.business_name, "Acme Plumbing");
        assert_eq!(site.seo_meta.title, "Acme Plumbing - Springfield");
        assert_eq!(site.seo_meta.description, "");
        assert!(site.tech_stack.is_empty());
        assert_eq!(site.services.len(), 1);
        assert_eq!(site.contact_info.phone.as_deref(), Some("555-123-4567"));
        assert_eq!(
            site.contact_info.hours.as_deref(),
            Some("Monday to Friday 8am to 6pm")
        );
    }

    #[test]
    fn test_homepage_markup_used_for_brand_and_tech() {
        let pages = vec![page("https://acme.com/", "Acme", &[], "Welcome to Acme.")];
        let fetched = FetchedHtml {
            final_url: "https://acme.com/".to_string(),
            html: r#"<html><head><title>Acme Roofing | Denver</title>
                     <meta name="generator" content="Wix.com Website Builder"></head>
                     <body><header><img src="/logo.svg"></header></body></html>"#
                .to_string(),
            headers: HashMap::from([("server".to_string(), "cloudflare".to_string())]),
        };
        let site = assemble_site("https://acme.com", pages, Some(&fetched));

        assert_eq!(site.brand_info.business_name, "Acme Roofing");
        assert_eq!(
            site.brand_info.logo_url.as_deref(),
            Some("https://acme.com/logo.svg")
        );
        assert_eq!(site.seo_meta.title, "Acme Roofing | Denver");
        assert_eq!(site.tech_stack, vec!["Wix", "Cloudflare"]);
    }
}
