//! Technology-stack fingerprinting
//!
//! Signals come from four places: the generator meta tag, script URLs,
//! response headers and framework-specific attributes. Detected names are
//! reported once each, in the order they were first seen.

use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("hardcoded selector is valid")
}

static GENERATOR: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[name="generator"]"#));
static SCRIPT_SRC: LazyLock<Selector> = LazyLock::new(|| selector("script[src]"));
static NEXT_DATA: LazyLock<Selector> = LazyLock::new(|| selector(r#"script[id="__NEXT_DATA__"]"#));
static REACT_ATTR: LazyLock<Selector> =
    LazyLock::new(|| selector("[data-reactroot], [data-reactid]"));
static ANGULAR_ATTR: LazyLock<Selector> =
    LazyLock::new(|| selector("[ng-app], [ng-controller]"));
static ANY_ELEMENT: LazyLock<Selector> = LazyLock::new(|| selector("*"));

/// Generator keywords checked in order; the first hit is the only generator signal
const GENERATOR_PLATFORMS: &[(&str, &str)] = &[
    ("wordpress", "WordPress"),
    ("wix", "Wix"),
    ("squarespace", "Squarespace"),
    ("drupal", "Drupal"),
    ("joomla", "Joomla"),
    ("shopify", "Shopify"),
];

/// Script URL fingerprints (case-insensitive patterns)
static SCRIPT_FINGERPRINTS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"wp-content|wp-includes", "WordPress"),
        (r"jquery", "jQuery"),
        (r"react", "React"),
        (r"angular", "Angular"),
        (r"vue", "Vue"),
        (r"next", "Next.js"),
        (r"gatsby", "Gatsby"),
        (r"wix\.com", "Wix"),
        (r"squarespace", "Squarespace"),
        (r"shopify", "Shopify"),
        (r"webflow", "Webflow"),
        (r"godaddy", "GoDaddy"),
        (r"google.*tag.*manager|gtm\.js", "Google Tag Manager"),
        (r"google.*analytics|ga\.js|gtag", "Google Analytics"),
    ]
    .into_iter()
    .map(|(pattern, name)| {
        let regex = Regex::new(&format!("(?i){}", pattern))
            .expect("hardcoded script fingerprint is valid");
        (regex, name)
    })
    .collect()
});

/// Insertion-ordered set of technology names
#[derive(Debug, Default)]
struct Stack(Vec<String>);

impl Stack {
    fn add(&mut self, name: &str) {
        if !self.0.iter().any(|existing| existing == name) {
            self.0.push(name.to_string());
        }
    }
}

/// Detects the platforms and libraries a homepage is built with
///
/// # Arguments
///
/// * `document` - The unmodified homepage markup
/// * `headers` - Response headers of the homepage fetch, lower-cased names
pub fn detect_tech_stack(document: &Html, headers: &HashMap<String, String>) -> Vec<String> {
    let mut stack = Stack::default();

    if let Some(generator) = document
        .select(&GENERATOR)
        .next()
        .and_then(|el| el.value().attr("content"))
        .filter(|g| !g.is_empty())
    {
        let lower = generator.to_lowercase();
        match GENERATOR_PLATFORMS
            .iter()
            .find(|(keyword, _)| lower.contains(keyword))
        {
            Some((_, name)) => stack.add(name),
            None => stack.add(generator.split_whitespace().next().unwrap_or(generator)),
        }
    }

    let scripts = document
        .select(&SCRIPT_SRC)
        .filter_map(|el| el.value().attr("src"))
        .collect::<Vec<_>>()
        .join(" ");
    let has_next_data = document.select(&NEXT_DATA).next().is_some();

    for (pattern, name) in SCRIPT_FINGERPRINTS.iter() {
        if pattern.is_match(&scripts) || (*name == "Next.js" && has_next_data) {
            stack.add(name);
        }
    }

    let server = headers
        .get("server")
        .or_else(|| headers.get("x-powered-by"))
        .map(|s| s.to_lowercase())
        .unwrap_or_default();
    for (keyword, name) in [("nginx", "Nginx"), ("apache", "Apache"), ("cloudflare", "Cloudflare")] {
        if server.contains(keyword) {
            stack.add(name);
        }
    }
    if headers.contains_key("x-shopify-stage") {
        stack.add("Shopify");
    }
    if headers.contains_key("x-wix-request-id") {
        stack.add("Wix");
    }

    if document.select(&REACT_ATTR).next().is_some() {
        stack.add("React");
    }
    if document.select(&ANGULAR_ATTR).next().is_some() {
        stack.add("Angular");
    }
    if has_vue_attributes(document) {
        stack.add("Vue");
    }

    stack.0
}

/// Vue leaves scoped-style attributes like `data-v-7ba5bd90` or a `v-cloak` marker
fn has_vue_attributes(document: &Html) -> bool {
    document.select(&ANY_ELEMENT).any(|el| {
        el.value()
            .attrs()
            .any(|(name, _)| name.starts_with("data-v-") || name == "v-cloak")
    })
}
