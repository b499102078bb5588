use crate::UrlError;
use url::Url;

/// Normalizes a user-supplied business URL into the crawl's base URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Prepend `https://` when no HTTP(S) scheme is present
/// 3. Remove trailing slashes
/// 4. Reject input that still does not parse or has no host
///
/// # Examples
///
/// ```
/// use bizcrawl::url::normalize_base_url;
///
/// let url = normalize_base_url("acme-plumbing.com/").unwrap();
/// assert_eq!(url, "https://acme-plumbing.com");
/// ```
pub fn normalize_base_url(input: &str) -> Result<String, UrlError> {
    let trimmed = input.trim();
    let lower = trimmed.to_ascii_lowercase();

    let mut normalized = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    while normalized.ends_with('/') {
        normalized.pop();
    }

    let url = Url::parse(&normalized).map_err(|e| UrlError::Parse(e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }
    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(normalized)
}

/// Canonicalizes a URL into the crawl's deduplication key
///
/// # Canonicalization Rules
///
/// - Scheme and host are lower-cased (the URL parser does this for HTTP(S))
/// - Trailing slashes are stripped from the path; an empty path becomes `/`
/// - The fragment is discarded
/// - The query string is kept, so `?utm_source=x` variants stay distinct pages
///
/// Unparseable input is lower-cased and returned as-is. The function is
/// idempotent: canonicalizing a canonical URL returns it unchanged.
///
/// # Examples
///
/// ```
/// use bizcrawl::url::canonicalize;
///
/// assert_eq!(canonicalize("https://ACME.com/Services/"), "https://acme.com/Services");
/// assert_eq!(canonicalize("https://acme.com"), "https://acme.com/");
/// assert_eq!(canonicalize("https://acme.com/a?b=1#top"), "https://acme.com/a?b=1");
/// ```
pub fn canonicalize(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return url.to_lowercase(),
    };

    let host = match parsed.host_str() {
        Some(h) => h.to_lowercase(),
        None => return url.to_lowercase(),
    };

    let path = parsed.path().trim_end_matches('/');
    let path = if path.is_empty() { "/" } else { path };

    let mut canonical = format!("{}://{}", parsed.scheme(), host);
    if let Some(port) = parsed.port() {
        canonical.push_str(&format!(":{}", port));
    }
    canonical.push_str(path);
    if let Some(query) = parsed.query() {
        canonical.push('?');
        canonical.push_str(query);
    }

    canonical
}
