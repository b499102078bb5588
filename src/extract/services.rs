//! Service offering extraction from page headings

use crate::site::{CrawledPage, ExtractedService};
use crate::text::truncate_chars;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Maximum number of services reported for one site
pub const MAX_SERVICES: usize = 12;

static SERVICE_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)service|what we (?:do|offer)|our work|capabilities|solutions|treatments|specialties",
    )
    .expect("hardcoded service section pattern is valid")
});

static NON_SERVICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:contact|about|blog|article|news|faq|frequently|how (?:do|can|much|to)|why |what (?:is|are|our)|get (?:your|a|an)|learn more|check out|resources|our process|testimonial|review|copyright|follow us|call us)",
    )
    .expect("hardcoded non-service pattern is valid")
});

static SERVICE_PAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)service|what-we-do|our-work|solution|treatment|specialt")
        .expect("hardcoded service page pattern is valid")
});

static EDITORIAL_PAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)blog|article|news|press|post").expect("hardcoded editorial pattern is valid")
});

static RUN_ON_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-z.!?])([A-Z][a-z])").expect("hardcoded boundary pattern is valid")
});

static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("hardcoded sentence pattern is valid"));

/// Whether a page URL looks like a page about services
pub fn is_service_page(url: &str) -> bool {
    SERVICE_PAGE.is_match(url)
}

/// Whether a heading labels a group of services ("Our Services", "What We Do")
pub fn is_section_heading(heading: &str) -> bool {
    SERVICE_SECTION.is_match(heading)
}

/// Whether a heading could name an individual service
///
/// Rejects short section labels, navigational and editorial phrases, and
/// anything outside 3-60 characters or longer than 8 words.
pub fn is_candidate_service_name(heading: &str) -> bool {
    let words = heading.split_whitespace().count();
    let chars = heading.chars().count();

    if is_section_heading(heading) && words <= 5 {
        return false;
    }
    if NON_SERVICE.is_match(heading) {
        return false;
    }
    (3..=60).contains(&chars) && words <= 8
}

/// Extracts up to 12 service offerings from the crawled pages
///
/// Service-looking pages are scanned first; blog, news and press pages are
/// ignored. A heading is accepted when it is a plausible service name and
/// either sits on a service page or directly follows a service section heading.
/// Names are deduplicated case-insensitively.
///
/// # Example
///
/// ```
/// use bizcrawl::extract_services;
/// use bizcrawl::site::CrawledPage;
///
/// let page = CrawledPage {
///     url: "https://acme.com/".to_string(),
///     title: "Acme".to_string(),
///     headings: vec!["Our Services".to_string(), "Kitchen Remodeling".to_string()],
///     body_text: "Our Services Kitchen Remodeling Custom cabinets and counters.".to_string(),
///     word_count: 8,
///     internal_links: vec![],
///     external_links: vec![],
///     images: vec![],
/// };
///
/// let services = extract_services(&[page]);
/// assert_eq!(services[0].name, "Kitchen Remodeling");
/// assert_eq!(services[0].description, "Custom cabinets and counters.");
/// ```
pub fn extract_services(pages: &[CrawledPage]) -> Vec<ExtractedService> {
    let mut ordered: Vec<&CrawledPage> = pages.iter().collect();
    ordered.sort_by_key(|page| !is_service_page(&page.url));

    let mut services = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    'pages: for page in ordered {
        if EDITORIAL_PAGE.is_match(&page.url) {
            continue;
        }
        let service_page = is_service_page(&page.url);

        for (i, heading) in page.headings.iter().enumerate() {
            if services.len() >= MAX_SERVICES {
                break 'pages;
            }

            let name = heading.trim();
            if !is_candidate_service_name(name) {
                continue;
            }

            let under_section = i > 0 && is_section_heading(&page.headings[i - 1]);
            if !service_page && !under_section {
                continue;
            }

            if !seen.insert(name.to_lowercase()) {
                continue;
            }

            services.push(ExtractedService {
                name: name.to_string(),
                description: describe_service(&page.body_text, name),
                page_url: Some(page.url.clone()),
            });
        }
    }

    services
}

/// Harvests a one- or two-sentence description following a heading in body text
///
/// Returns an empty string when the heading does not occur in the text.
pub fn describe_service(body_text: &str, heading: &str) -> String {
    let Some(idx) = body_text.find(heading) else {
        return String::new();
    };

    let after = truncate_chars(&body_text[idx + heading.len()..], 500);
    let after = RUN_ON_BOUNDARY.replace_all(after.trim(), "$1 $2");

    let sentences: Vec<&str> = SENTENCE
        .find_iter(&after)
        .take(2)
        .map(|m| m.as_str())
        .collect();

    if sentences.is_empty() {
        return truncate_chars(&after, 150).trim().to_string();
    }

    let description = sentences.join(" ").trim().to_string();
    if description.chars().count() > 200 {
        format!("{}...", truncate_chars(&description, 200).trim())
    } else {
        description
    }
}
