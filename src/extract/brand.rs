//! Brand identity extraction from the raw homepage markup
//!
//! Business name, tagline, logo, favicon and primary color all come from
//! markup that the page parser throws away (meta tags, header images,
//! inline styles), so these functions work on a freshly parsed document.

use crate::site::{BrandInfo, CrawledPage};
use crate::url::resolve_url;
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("hardcoded selector is valid")
}

static SITE_NAME: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[property="og:site_name"]"#));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static TAGLINE: LazyLock<Selector> = LazyLock::new(|| {
    selector("header h2, header p, .hero p, .hero h2, [class*='hero'] p")
});
static LOGO: LazyLock<Selector> =
    LazyLock::new(|| selector("header img, nav img, .logo img, [class*='logo'] img"));
static FAVICON: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"link[rel="icon"], link[rel="shortcut icon"]"#));
static STYLE: LazyLock<Selector> = LazyLock::new(|| selector("style"));

/// Elements whose inline `style` may carry the brand background, in priority order
static COLOR_TARGETS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    [
        "header",
        "nav",
        ".navbar",
        r#"[class*="header"]"#,
        r#"a[class*="btn-primary"]"#,
        r#"button[class*="primary"]"#,
        r#"[class*="cta"]"#,
    ]
    .into_iter()
    .map(selector)
    .collect()
});

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("hardcoded regex pattern is valid")
}

static TITLE_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| regex(r"[|\-\x{2013}\x{2014}]"));
static CSS_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"--(?:primary|brand|main|accent)[-\w]*\s*:\s*(#[0-9a-fA-F]{3,8}|rgba?\([^)]+\))")
});
static INLINE_BACKGROUND: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"background(?:-color)?\s*:\s*(#[0-9a-fA-F]{3,8}|rgba?\([^)]+\))")
});
static HEADER_RULE_BACKGROUND: LazyLock<Regex> = LazyLock::new(|| {
    regex(r"(?:header|nav|\.navbar|\.nav)\s*\{[^}]*background(?:-color)?\s*:\s*(#[0-9a-fA-F]{3,8})")
});

/// Extracts brand details from the homepage document
///
/// # Arguments
///
/// * `document` - The unmodified homepage markup
/// * `origin` - Site origin used to resolve logo and favicon URLs
pub fn extract_brand_info(document: &Html, origin: &Url) -> BrandInfo {
    let title = first_text(document, &TITLE).unwrap_or_default();

    let business_name = document
        .select(&SITE_NAME)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| business_name_from_title(&title));

    let tagline = first_text(document, &TAGLINE).filter(|t| !t.is_empty());

    let logo_url = first_attr(document, &LOGO, "src").map(|src| absolutize(&src, origin));
    let favicon = first_attr(document, &FAVICON, "href").map(|href| absolutize(&href, origin));

    BrandInfo {
        business_name,
        tagline,
        primary_color: extract_primary_color(document),
        logo_url,
        favicon,
    }
}

/// Brand details when only the parsed homepage is available
pub fn default_brand_info(homepage: Option<&CrawledPage>) -> BrandInfo {
    BrandInfo {
        business_name: homepage
            .map(|page| business_name_from_title(&page.title))
            .unwrap_or_default(),
        ..BrandInfo::default()
    }
}

/// First segment of a title split on `|`, `-`, en dash or em dash
///
/// ```
/// use bizcrawl::extract::business_name_from_title;
///
/// assert_eq!(business_name_from_title("Acme Plumbing | Springfield IL"), "Acme Plumbing");
/// ```
pub fn business_name_from_title(title: &str) -> String {
    TITLE_SEPARATOR
        .split(title)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Finds the brand's primary color
///
/// Checked in order, first match wins:
/// 1. A `--primary`/`--brand`/`--main`/`--accent*` custom property in any `<style>` block
/// 2. An inline `background`/`background-color` on header, nav or call-to-action elements
/// 3. A `background` declaration in a `header`/`nav`/`.navbar`/`.nav` CSS rule
pub fn extract_primary_color(document: &Html) -> Option<String> {
    let css = document
        .select(&STYLE)
        .map(|el| el.text().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n");

    if let Some(caps) = CSS_VARIABLE.captures(&css) {
        return Some(caps[1].to_string());
    }

    for target in COLOR_TARGETS.iter() {
        let Some(style) = document
            .select(target)
            .next()
            .and_then(|el| el.value().attr("style"))
        else {
            continue;
        };
        if let Some(caps) = INLINE_BACKGROUND.captures(style) {
            return Some(caps[1].to_string());
        }
    }

    HEADER_RULE_BACKGROUND
        .captures(&css)
        .map(|caps| caps[1].to_string())
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn first_attr(document: &Html, selector: &Selector, attr: &str) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::to_string)
}

/// Resolves against the origin, keeping the raw value if it cannot be resolved
fn absolutize(href: &str, origin: &Url) -> String {
    resolve_url(href, origin).unwrap_or_else(|| href.to_string())
}
