//! Light single-page profile of a competitor homepage
//!
//! No breadth-first crawl and no rendering fallback: one static fetch, a
//! handful of counts, and the service and contact extractors run over the
//! parsed homepage.

use crate::crawler::parser::{detach_matching, element_text, parse_page};
use crate::extract::{extract_contact_info, extract_services, JSON_LD};
use crate::site::{ContactInfo, ExtractedService};
use crate::text::count_words;
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use std::sync::LazyLock;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("hardcoded selector is valid")
}

static SCRIPTING: LazyLock<Selector> = LazyLock::new(|| selector("script, style, noscript"));
static BODY: LazyLock<Selector> = LazyLock::new(|| selector("body"));
static SUBHEADINGS: LazyLock<Selector> = LazyLock::new(|| selector("h2, h3"));
static BLOG_LINK: LazyLock<Selector> = LazyLock::new(|| {
    selector(r#"a[href*="blog"], a[href*="article"], a[href*="news"]"#)
});

static NOT_A_SERVICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)about|contact|blog|faq|review|testimonial")
        .expect("hardcoded heading filter is valid")
});

/// Basic content signals for one homepage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageProfile {
    /// URL that was fetched
    pub url: String,
    /// Words in `<body>` after scripts and styles are removed
    pub word_count: usize,
    /// `h2`/`h3` headings that look like offerings
    pub service_count: usize,
    /// Whether any JSON-LD block is present
    pub has_schema: bool,
    /// Whether any link points at a blog, article or news page
    pub has_blog: bool,
    pub services: Vec<ExtractedService>,
    pub contact: ContactInfo,
}

/// Builds a profile from homepage markup
///
/// Fails only when `url` cannot serve as a base for link resolution.
pub fn profile_markup(url: &str, html: &str, max_body_chars: usize) -> crate::UrlResult<HomepageProfile> {
    let page = parse_page(url, html, max_body_chars)?;
    let services = extract_services(std::slice::from_ref(&page));
    let contact = extract_contact_info(std::slice::from_ref(&page));

    let mut document = Html::parse_document(html);
    let has_schema = document.select(&JSON_LD).next().is_some();
    let has_blog = document.select(&BLOG_LINK).next().is_some();

    detach_matching(&mut document, &SCRIPTING);

    let word_count = document
        .select(&BODY)
        .next()
        .map(|body| count_words(&element_text(body)))
        .unwrap_or(0);

    let service_count = document
        .select(&SUBHEADINGS)
        .map(element_text)
        .filter(|text| is_offering_heading(text))
        .count();

    Ok(HomepageProfile {
        url: url.to_string(),
        word_count,
        service_count,
        has_schema,
        has_blog,
        services,
        contact,
    })
}

fn is_offering_heading(text: &str) -> bool {
    let chars = text.chars().count();
    chars > 3 && chars < 60 && !NOT_A_SERVICE.is_match(text)
}
