//! SEO metadata and structured-data extraction

use crate::site::{CrawledPage, SeoMeta};
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("hardcoded selector is valid")
}

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static DESCRIPTION: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"meta[name="description"]"#));
static OG_IMAGE: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[property="og:image"]"#));
pub(crate) static JSON_LD: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"script[type="application/ld+json"]"#));

/// Extracts title, description, Open Graph image and JSON-LD from the homepage
pub fn extract_seo_meta(document: &Html) -> SeoMeta {
    let title = document
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let description = document
        .select(&DESCRIPTION)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    let og_image = document
        .select(&OG_IMAGE)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string);

    SeoMeta {
        title,
        description,
        og_image,
        schema: extract_schema(document),
    }
}

/// SEO metadata when only the parsed homepage is available
pub fn default_seo_meta(homepage: Option<&CrawledPage>) -> SeoMeta {
    SeoMeta {
        title: homepage.map(|page| page.title.clone()).unwrap_or_default(),
        ..SeoMeta::default()
    }
}

/// Picks the JSON-LD block describing the business
///
/// The first block whose `@type` mentions "Business" wins; otherwise the
/// first block that parses at all. Malformed blocks are skipped.
pub fn extract_schema(document: &Html) -> Option<Value> {
    let mut first_parsed: Option<Value> = None;

    for element in document.select(&JSON_LD) {
        let raw = element.text().collect::<String>();
        let parsed: Value = match serde_json::from_str(raw.trim()) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!("Skipping malformed JSON-LD block: {}", e);
                continue;
            }
        };

        if is_business_type(&parsed) {
            return Some(parsed);
        }
        if first_parsed.is_none() {
            first_parsed = Some(parsed);
        }
    }

    first_parsed
}

/// `@type` is either a string or an array of strings
fn is_business_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(t)) => t.contains("Business"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.contains("Business")),
        _ => false,
    }
}
