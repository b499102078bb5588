//! Markdown brief generation
//!
//! This module renders a `CrawledSite` as a human-readable markdown brief:
//! brand, contact details, services, about text, testimonials, tech stack
//! and the pages that were crawled.

use crate::site::CrawledSite;
use std::fmt::Write;

/// Formats a crawled site as markdown
///
/// # Arguments
///
/// * `site` - The crawled site
///
/// # Returns
///
/// A formatted markdown string
pub fn format_site_markdown(site: &CrawledSite) -> String {
    let mut md = String::new();

    if site.is_empty() {
        let _ = writeln!(md, "# {}\n", site.url);
        md.push_str("No data available: the site could not be crawled.\n");
        return md;
    }

    // Title
    let name = if site.brand_info.business_name.is_empty() {
        site.url.as_str()
    } else {
        site.brand_info.business_name.as_str()
    };
    let _ = writeln!(md, "# {}\n", name);
    if let Some(tagline) = &site.brand_info.tagline {
        let _ = writeln!(md, "_{}_\n", tagline);
    }

    // Brand
    md.push_str("## Brand\n\n");
    let _ = writeln!(md, "- **Website**: {}", site.url);
    optional_line(&mut md, "Primary Color", site.brand_info.primary_color.as_deref());
    optional_line(&mut md, "Logo", site.brand_info.logo_url.as_deref());
    optional_line(&mut md, "Favicon", site.brand_info.favicon.as_deref());
    md.push('\n');

    // Contact
    md.push_str("## Contact\n\n");
    let contact = &site.contact_info;
    if contact.phone.is_none()
        && contact.email.is_none()
        && contact.address.is_none()
        && contact.hours.is_none()
    {
        md.push_str("No contact details found.\n");
    }
    optional_line(&mut md, "Phone", contact.phone.as_deref());
    optional_line(&mut md, "Email", contact.email.as_deref());
    optional_line(&mut md, "Address", contact.address.as_deref());
    optional_line(&mut md, "Hours", contact.hours.as_deref());
    md.push('\n');

    // Services
    if !site.services.is_empty() {
        let _ = writeln!(md, "## Services ({})\n", site.services.len());
        for service in &site.services {
            if service.description.is_empty() {
                let _ = writeln!(md, "- **{}**", service.name);
            } else {
                let _ = writeln!(md, "- **{}**: {}", service.name, service.description);
            }
        }
        md.push('\n');
    }

    // About
    if let Some(about) = &site.about_content {
        md.push_str("## About\n\n");
        let _ = writeln!(md, "{}\n", about);
    }

    // Testimonials
    if !site.testimonials.is_empty() {
        md.push_str("## Testimonials\n\n");
        for quote in &site.testimonials {
            let _ = writeln!(md, "> {}\n", quote);
        }
    }

    // Tech stack
    if !site.tech_stack.is_empty() {
        md.push_str("## Tech Stack\n\n");
        let _ = writeln!(md, "{}\n", site.tech_stack.join(", "));
    }

    // SEO
    md.push_str("## SEO\n\n");
    let _ = writeln!(md, "- **Title**: {}", site.seo_meta.title);
    if !site.seo_meta.description.is_empty() {
        let _ = writeln!(md, "- **Description**: {}", site.seo_meta.description);
    }
    optional_line(&mut md, "Open Graph Image", site.seo_meta.og_image.as_deref());
    let _ = writeln!(
        md,
        "- **Structured Data**: {}\n",
        if site.seo_meta.schema.is_some() { "yes" } else { "no" }
    );

    // Pages
    let _ = writeln!(md, "## Pages Crawled ({})\n", site.pages.len());
    md.push_str("| URL | Title | Words |\n");
    md.push_str("|-----|-------|-------|\n");
    for page in &site.pages {
        let _ = writeln!(
            md,
            "| {} | {} | {} |",
            page.url,
            page.title.replace('|', "\\|"),
            page.word_count
        );
    }

    md
}

fn optional_line(md: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        let _ = writeln!(md, "- **{}**: {}", label, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::{CrawledPage, ExtractedService};

    #[test]
    fn test_empty_site() {
        let md = format_site_markdown(&CrawledSite::empty("https://acme.com"));
        assert!(md.starts_with("# https://acme.com"));
        assert!(md.contains("No data available"));
    }

    #[test]
    fn test_site_brief() {
        let mut site = CrawledSite::empty("https://acme.com");
        site.brand_info.business_name = "Acme Plumbing".to_string();
        site.contact_info.phone = Some("555-123-4567".to_string());
        site.services.push(ExtractedService {
            name: "Drain Cleaning".to_string(),
            description: "Fast and clean.".to_string(),
            page_url: None,
        });
        site.tech_stack = vec!["WordPress".to_string(), "Nginx".to_string()];
        site.pages.push(CrawledPage {
            url: "https://acme.com/".to_string(),
            title: "Acme | Home".to_string(),
            headings: vec![],
            body_text: "Welcome".to_string(),
            word_count: 1,
            internal_links: vec![],
            external_links: vec![],
            images: vec![],
        });

        let md = format_site_markdown(&site);
        assert!(md.starts_with("# Acme Plumbing\n"));
        assert!(md.contains("- **Phone**: 555-123-4567"));
        assert!(md.contains("## Services (1)"));
        assert!(md.contains("- **Drain Cleaning**: Fast and clean."));
        assert!(md.contains("WordPress, Nginx"));
        assert!(md.contains("| https://acme.com/ | Acme \\| Home | 1 |"));
        assert!(!md.contains("## Testimonials"));
    }
}
