//! HTML page parser
//!
//! This module turns raw HTML into a `CrawledPage`:
//! - Strips scripts, styles, embeds and navigation before reading anything
//! - Extracts the title and `h1`-`h4` headings in document order
//! - Reads body text from the main content region when one exists
//! - Resolves and classifies links against the page's origin
//! - Records images with the layout region they sit in

use crate::site::{CrawledPage, SiteImage};
use crate::text::{collapse_whitespace, count_words, truncate_chars};
use crate::url::{origin_of, resolve_url, ClassifiedLinks};
use crate::UrlError;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

/// Headings at or above this length are treated as paragraphs, not headings
pub const MAX_HEADING_CHARS: usize = 150;

/// Images recorded per page
const MAX_IMAGES_PER_PAGE: usize = 20;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("hardcoded selector is valid")
}

static NOISE: LazyLock<Selector> =
    LazyLock::new(|| selector("script, style, noscript, iframe, svg"));
static NAVIGATION: LazyLock<Selector> = LazyLock::new(|| selector("nav, [role='navigation']"));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static HEADINGS: LazyLock<Selector> = LazyLock::new(|| selector("h1, h2, h3, h4"));
static CONTENT_SCOPE: LazyLock<Selector> =
    LazyLock::new(|| selector("main, article, [role='main'], .content, #content"));
static BODY: LazyLock<Selector> = LazyLock::new(|| selector("body"));
static SCOPE_NOISE: LazyLock<Selector> =
    LazyLock::new(|| selector("[class*='skip'], [class*='cookie'], [class*='banner']"));
static LINKS: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));
static IMAGES: LazyLock<Selector> = LazyLock::new(|| selector("img[src]"));

/// Parses HTML content into a crawled page
///
/// # Arguments
///
/// * `url` - The URL the page was fetched from; links resolve against its origin
/// * `html` - The HTML content to parse
/// * `max_body_chars` - Cap on the stored body text
///
/// # Returns
///
/// * `Ok(CrawledPage)` - Parsed page (malformed markup is parsed leniently)
/// * `Err(UrlError)` - The page URL itself has no usable origin
///
/// # Example
///
/// ```
/// use bizcrawl::crawler::parse_page;
///
/// let html = r#"<html><head><title>Acme</title></head><body><h1>Welcome</h1><a href="/about">About</a></body></html>"#;
/// let page = parse_page("https://acme.com/", html, 10_000).unwrap();
/// assert_eq!(page.title, "Acme");
/// assert_eq!(page.internal_links, vec!["https://acme.com/about".to_string()]);
/// ```
pub fn parse_page(url: &str, html: &str, max_body_chars: usize) -> Result<CrawledPage, UrlError> {
    let origin = origin_of(url).ok_or_else(|| UrlError::Parse(url.to_string()))?;
    let mut document = Html::parse_document(html);

    detach_matching(&mut document, &NOISE);
    detach_matching(&mut document, &NAVIGATION);

    let title = extract_title(&document);
    let headings = extract_headings(&document);
    let images = extract_images(&document, &origin);

    let body_text = extract_body_text(&mut document);
    let word_count = count_words(&body_text);

    let mut links = ClassifiedLinks::default();
    for element in document.select(&LINKS) {
        if let Some(href) = element.value().attr("href") {
            links.push_href(href, &origin);
        }
    }

    Ok(CrawledPage {
        url: url.to_string(),
        title,
        headings,
        body_text: truncate_chars(&body_text, max_body_chars),
        word_count,
        internal_links: links.internal,
        external_links: links.external,
        images,
    })
}

/// Removes every element matching `selector` from the document tree
pub(crate) fn detach_matching(document: &mut Html, selector: &Selector) {
    let ids: Vec<_> = document.select(selector).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Text of an element with whitespace collapsed
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> String {
    document
        .select(&TITLE)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn extract_headings(document: &Html) -> Vec<String> {
    document
        .select(&HEADINGS)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty() && text.chars().count() < MAX_HEADING_CHARS)
        .collect()
}

/// Reads the main content region (or `<body>`) minus skip links and cookie banners
fn extract_body_text(document: &mut Html) -> String {
    let scope_id = document
        .select(&CONTENT_SCOPE)
        .next()
        .or_else(|| document.select(&BODY).next())
        .map(|element| element.id());

    let Some(scope_id) = scope_id else {
        return String::new();
    };

    let noise: Vec<_> = document
        .tree
        .get(scope_id)
        .and_then(ElementRef::wrap)
        .map(|scope| scope.select(&SCOPE_NOISE).map(|el| el.id()).collect())
        .unwrap_or_default();
    for id in noise {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    document
        .tree
        .get(scope_id)
        .and_then(ElementRef::wrap)
        .map(element_text)
        .unwrap_or_default()
}

fn extract_images(document: &Html, origin: &Url) -> Vec<SiteImage> {
    let mut images: Vec<SiteImage> = Vec::new();

    for element in document.select(&IMAGES) {
        if images.len() >= MAX_IMAGES_PER_PAGE {
            break;
        }

        let Some(src) = element.value().attr("src") else {
            continue;
        };
        let Some(url) = resolve_url(src, origin).filter(|u| u.starts_with("http")) else {
            continue;
        };
        if images.iter().any(|image| image.url == url) {
            continue;
        }

        images.push(SiteImage {
            url,
            alt: element.value().attr("alt").unwrap_or("").trim().to_string(),
            context: image_context(element).to_string(),
        });
    }

    images
}

/// Labels the layout region an image sits in by walking its ancestors
fn image_context(element: ElementRef<'_>) -> &'static str {
    for ancestor in element.ancestors().filter_map(ElementRef::wrap) {
        let value = ancestor.value();
        match value.name() {
            "header" => return "header",
            "footer" => return "footer",
            _ => {}
        }

        let class = value.attr("class").unwrap_or("").to_ascii_lowercase();
        if class.contains("hero") || class.contains("banner") {
            return "hero";
        }
        if class.contains("gallery") || class.contains("portfolio") {
            return "gallery";
        }
    }
    "content"
}
