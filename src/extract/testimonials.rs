//! Customer testimonial extraction

use crate::site::CrawledPage;
use crate::text::truncate_chars;
use regex::Regex;
use std::sync::LazyLock;

const SECTION_WINDOW_CHARS: usize = 3_000;
const MAX_QUOTES_PER_PAGE: usize = 5;
const MIN_QUOTE_CHARS: usize = 30;

static REVIEW_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)testimonial|review|what (?:our )?(?:clients|customers|patients) say|hear from")
        .expect("hardcoded review section pattern is valid")
});

// Straight or curly double quotes around 30-500 characters
static QUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["\x{201C}]([^"\x{201D}]{30,500})["\x{201D}]"#)
        .expect("hardcoded quote pattern is valid")
});

/// Collects quoted customer statements found after a review-section keyword
///
/// Each page contributes at most five quotes taken from the 3000 characters
/// following its first testimonial/review keyword.
pub fn extract_testimonials(pages: &[CrawledPage]) -> Vec<String> {
    let mut testimonials = Vec::new();

    for page in pages {
        let Some(section) = REVIEW_SECTION.find(&page.body_text) else {
            continue;
        };
        let window = truncate_chars(&page.body_text[section.start()..], SECTION_WINDOW_CHARS);

        for caps in QUOTE.captures_iter(&window).take(MAX_QUOTES_PER_PAGE) {
            let quote = caps[1].trim();
            if quote.chars().count() > MIN_QUOTE_CHARS {
                testimonials.push(quote.to_string());
            }
        }
    }

    testimonials
}
