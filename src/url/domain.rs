use url::Url;

/// Returns true if `link` shares scheme, host and port with `origin`
///
/// Non-hierarchical links such as `mailto:` are never internal, and a link
/// that fails to parse is treated as external.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use bizcrawl::url::is_same_origin;
///
/// let origin = Url::parse("https://example.com").unwrap();
/// assert!(is_same_origin("https://example.com/about", &origin));
/// assert!(!is_same_origin("https://blog.example.com/", &origin));
/// assert!(!is_same_origin("mailto:hi@example.com", &origin));
/// ```
pub fn is_same_origin(link: &str, origin: &Url) -> bool {
    match Url::parse(link) {
        Ok(url) => url.origin().is_tuple() && url.origin() == origin.origin(),
        Err(_) => false,
    }
}
