//! About-the-business text extraction

use crate::site::CrawledPage;
use crate::text::{char_offset, truncate_chars};
use regex::Regex;
use std::sync::LazyLock;

const ABOUT_PAGE_CHARS: usize = 3_000;
const ABOUT_SECTION_CHARS: usize = 1_500;

/// Leading boilerplate is only trimmed when the first sentence starts this early
const MAX_LEADING_SKIP: usize = 200;

static ABOUT_PAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)about|who-we-are|our-story|our-team").expect("hardcoded about page pattern is valid")
});

static FIRST_SENTENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z][a-z].*?[.!?]\s").expect("hardcoded sentence start pattern is valid")
});

static ABOUT_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)about us|who we are|our story|our mission")
        .expect("hardcoded about section pattern is valid")
});

/// Extracts a description of the business
///
/// A dedicated about page wins: its text from the first real sentence, up to
/// 3000 characters. Otherwise the homepage is searched for an "about us" style
/// phrase and a 1500-character window from there is returned.
pub fn extract_about_content(pages: &[CrawledPage]) -> Option<String> {
    if let Some(page) = pages.iter().find(|p| ABOUT_PAGE.is_match(&p.url)) {
        let mut text = page.body_text.as_str();
        if let Some(m) = FIRST_SENTENCE.find(text) {
            let offset = char_offset(text, m.start());
            if offset > 0 && offset < MAX_LEADING_SKIP {
                text = &text[m.start()..];
            }
        }
        return non_empty(truncate_chars(text, ABOUT_PAGE_CHARS));
    }

    let homepage = pages.first()?;
    let m = ABOUT_SECTION.find(&homepage.body_text)?;
    let window = truncate_chars(&homepage.body_text[m.start()..], ABOUT_SECTION_CHARS);
    non_empty(window.trim().to_string())
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
