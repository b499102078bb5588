use regex::Regex;
use std::sync::LazyLock;

/// Binary, document, style, script, font and data extensions that are never crawled
static SKIPPED_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\.(pdf|jpg|jpeg|png|gif|svg|webp|mp4|mp3|zip|doc|docx|xls|xlsx|css|js|xml|json|ico|woff|woff2|ttf|eot)(\?|$)",
    )
    .expect("hardcoded regex pattern is valid")
});

/// Returns true if the URL points at a non-HTML asset
///
/// The extension is checked at the end of the URL or directly before its
/// query string.
///
/// # Examples
///
/// ```
/// use bizcrawl::url::should_skip_url;
///
/// assert!(should_skip_url("https://acme.com/brochure.PDF"));
/// assert!(should_skip_url("https://acme.com/app.js?v=3"));
/// assert!(!should_skip_url("https://acme.com/services"));
/// ```
pub fn should_skip_url(url: &str) -> bool {
    SKIPPED_EXTENSION.is_match(url)
}
