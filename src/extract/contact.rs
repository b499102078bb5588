//! Contact detail extraction (phone, email, street address, opening hours)

use crate::site::{ContactInfo, CrawledPage};
use crate::text::truncate_chars;
use regex::Regex;
use std::sync::LazyLock;

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+1[-.\s]?)?(?:\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4})")
        .expect("hardcoded phone pattern is valid")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
        .expect("hardcoded email pattern is valid")
});

static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\d{1,5}\s+[\w\s.]+(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Drive|Dr|Lane|Ln|Way|Court|Ct|Place|Pl)\.?,?\s+[\w\s]+,?\s*[A-Z]{2}\s*\d{5}",
    )
    .expect("hardcoded address pattern is valid")
});

static HOURS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Mon(?:day)?|hours)[^.]{0,200}(?:\d{1,2}\s*(?:am|pm))")
        .expect("hardcoded hours pattern is valid")
});

const MAX_HOURS_CHARS: usize = 200;

/// Extracts phone, email and address from the crawled pages
///
/// Body text of every page is searched as one string. An email taken from a
/// `mailto:` link beats one that merely appears in text. Opening hours are
/// left empty; `extract_hours` fills them in separately.
///
/// # Example
///
/// ```
/// use bizcrawl::extract_contact_info;
/// use bizcrawl::site::CrawledPage;
///
/// let page = CrawledPage {
///     url: "https://acme.com/contact".to_string(),
///     title: String::new(),
///     headings: vec![],
///     body_text: "Call (555) 123-4567 or write to sales@acme.com".to_string(),
///     word_count: 6,
///     internal_links: vec![],
///     external_links: vec!["mailto:info@acme.com?subject=Hi".to_string()],
///     images: vec![],
/// };
///
/// let contact = extract_contact_info(&[page]);
/// assert_eq!(contact.phone.as_deref(), Some("(555) 123-4567"));
/// assert_eq!(contact.email.as_deref(), Some("info@acme.com"));
/// ```
pub fn extract_contact_info(pages: &[CrawledPage]) -> ContactInfo {
    let all_text = joined_body_text(pages);

    let phone = PHONE
        .find(&all_text)
        .map(|m| m.as_str().trim().to_string());

    let email = mailto_address(pages).or_else(|| {
        EMAIL
            .find(&all_text)
            .map(|m| m.as_str().to_string())
    });

    let address = ADDRESS
        .find(&all_text)
        .map(|m| m.as_str().trim().to_string());

    ContactInfo {
        phone,
        email,
        address,
        hours: None,
    }
}

/// Finds an opening-hours snippet such as "Monday - Friday 8am to 5pm"
pub fn extract_hours(pages: &[CrawledPage]) -> Option<String> {
    let all_text = joined_body_text(pages);
    HOURS
        .find(&all_text)
        .map(|m| truncate_chars(m.as_str().trim(), MAX_HOURS_CHARS))
}

/// The first `mailto:` address in any page's external links, query stripped
fn mailto_address(pages: &[CrawledPage]) -> Option<String> {
    pages
        .iter()
        .flat_map(|page| page.external_links.iter())
        .find_map(|link| {
            let prefix = link.get(..7)?;
            if !prefix.eq_ignore_ascii_case("mailto:") {
                return None;
            }
            let address = link[7..].split('?').next().unwrap_or_default();
            if address.is_empty() {
                None
            } else {
                Some(address.to_string())
            }
        })
}

fn joined_body_text(pages: &[CrawledPage]) -> String {
    pages
        .iter()
        .map(|p| p.body_text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
