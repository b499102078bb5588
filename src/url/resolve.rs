use url::Url;

/// Schemes and prefixes that never lead to a crawlable page
const NON_CRAWLABLE_PREFIXES: &[&str] = &["#", "javascript:", "tel:", "data:", "blob:"];

/// Resolves an href found on a page against the site's origin
///
/// Returns `None` if the link should be excluded:
/// - `javascript:`, `tel:`, `data:`, `blob:` schemes
/// - Fragment-only links (`#section`)
/// - Input the URL parser rejects
///
/// `mailto:` links are returned verbatim (trimmed) so contact extraction can
/// pick them up later. Every other href is joined onto `origin` with standard
/// URL rules and its fragment is stripped.
///
/// # Examples
///
/// ```
/// use bizcrawl::url::resolve_url;
/// use url::Url;
///
/// let origin = Url::parse("https://acme.com").unwrap();
/// assert_eq!(
///     resolve_url("/services#top", &origin),
///     Some("https://acme.com/services".to_string())
/// );
/// assert_eq!(resolve_url("tel:555-1234", &origin), None);
/// assert_eq!(
///     resolve_url("mailto:info@acme.com", &origin),
///     Some("mailto:info@acme.com".to_string())
/// );
/// ```
pub fn resolve_url(href: &str, origin: &Url) -> Option<String> {
    let href = href.trim();
    let lower = href.to_ascii_lowercase();

    if lower.starts_with("mailto:") {
        return Some(href.to_string());
    }

    if NON_CRAWLABLE_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        return None;
    }

    let mut resolved = origin.join(href).ok()?;
    resolved.set_fragment(None);
    Some(resolved.to_string())
}
