//! Conversion of rendering-proxy markdown into a `CrawledPage`
//!
//! The proxy returns readable markdown rather than HTML, so the page shape is
//! rebuilt from markdown syntax: headings become the title and heading list,
//! links become classified links, images become page images, and everything
//! else is stripped down to plain body text.

use crate::crawler::parser::MAX_HEADING_CHARS;
use crate::site::{CrawledPage, SiteImage};
use crate::text::{collapse_whitespace, count_words, truncate_chars};
use crate::url::{origin_of, resolve_url, ClassifiedLinks};
use crate::UrlError;
use regex::Regex;
use std::sync::LazyLock;

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hardcoded regex pattern is valid")
}

static TITLE: LazyLock<Regex> = LazyLock::new(|| regex(r"(?m)^#\s+(.+)$"));
static HEADING: LazyLock<Regex> = LazyLock::new(|| regex(r"(?m)^#{1,4}\s+(.+)$"));
static LINK: LazyLock<Regex> = LazyLock::new(|| regex(r"\[([^\]]+)\]\(([^)]+)\)"));
static IMAGE: LazyLock<Regex> = LazyLock::new(|| regex(r"!\[([^\]]*)\]\(([^)]+)\)"));

static HEADING_MARKER: LazyLock<Regex> = LazyLock::new(|| regex(r"(?m)^#{1,6}\s+"));
static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| regex(r"(?s)```.*?```"));
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| regex(r"`[^`]+`"));
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| regex(r"[*_]{1,3}([^*_]+)[*_]{1,3}"));
static BULLET: LazyLock<Regex> = LazyLock::new(|| regex(r"(?m)^\s*[-*+]\s+"));
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| regex(r"(?m)^\s*\d+\.\s+"));

/// Converts rendered markdown into a page
///
/// # Arguments
///
/// * `url` - The page the markdown was rendered from
/// * `markdown` - Proxy response body
/// * `max_body_chars` - Cap on the stored body text
///
/// # Example
///
/// ```
/// use bizcrawl::crawler::parse_markdown;
///
/// let md = "# Acme Roofing\n\nWe install **metal** roofs. [About](/about)\n";
/// let page = parse_markdown("https://acme.com/", md, 10_000).unwrap();
/// assert_eq!(page.title, "Acme Roofing");
/// assert_eq!(page.body_text, "Acme Roofing We install metal roofs. About");
/// assert_eq!(page.internal_links, vec!["https://acme.com/about".to_string()]);
/// ```
pub fn parse_markdown(
    url: &str,
    markdown: &str,
    max_body_chars: usize,
) -> Result<CrawledPage, UrlError> {
    let origin = origin_of(url).ok_or_else(|| UrlError::Parse(url.to_string()))?;

    let title = TITLE
        .captures(markdown)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_default();

    let headings = HEADING
        .captures_iter(markdown)
        .map(|caps| caps[1].trim().to_string())
        .filter(|text| !text.is_empty() && text.chars().count() < MAX_HEADING_CHARS)
        .collect();

    let body_text = strip_markdown(markdown);
    let word_count = count_words(&body_text);

    let mut images: Vec<SiteImage> = Vec::new();
    for caps in IMAGE.captures_iter(markdown) {
        let Some(src) = resolve_url(&caps[2], &origin).filter(|u| u.starts_with("http")) else {
            continue;
        };
        if images.iter().any(|image| image.url == src) {
            continue;
        }
        images.push(SiteImage {
            url: src,
            alt: caps[1].trim().to_string(),
            context: "content".to_string(),
        });
    }

    // Image syntax contains link syntax; drop images before collecting links
    let without_images = IMAGE.replace_all(markdown, "");
    let mut links = ClassifiedLinks::default();
    for caps in LINK.captures_iter(&without_images) {
        links.push_href(&caps[2], &origin);
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

/// Strips markdown syntax down to whitespace-collapsed plain text
pub fn strip_markdown(markdown: &str) -> String {
    let text = HEADING_MARKER.replace_all(markdown, "");
    let text = CODE_BLOCK.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "");
    let text = IMAGE.replace_all(&text, "");
    let text = LINK.replace_all(&text, "$1");
    let text = EMPHASIS.replace_all(&text, "$1");
    let text = BULLET.replace_all(&text, "");
    let text = NUMBERED.replace_all(&text, "");
    collapse_whitespace(&text)
}
