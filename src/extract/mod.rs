//! Structured extraction module for Bizcrawl
//!
//! Every extractor is a pure function. Page-level extractors work over the
//! crawled pages; brand, SEO and tech-stack extractors read the raw homepage
//! document because they need markup the page parser discards. A heuristic
//! that finds nothing yields `None` or an empty collection, never an error.

mod about;
mod brand;
mod contact;
mod images;
mod seo;
mod services;
mod tech;
mod testimonials;

// Re-export main functions
pub use about::extract_about_content;
pub use brand::{business_name_from_title, default_brand_info, extract_brand_info, extract_primary_color};
pub use contact::{extract_contact_info, extract_hours};
pub use images::{extract_images, MAX_SITE_IMAGES};
pub use seo::{default_seo_meta, extract_schema, extract_seo_meta};
pub use services::{
    describe_service, extract_services, is_candidate_service_name, is_section_heading,
    is_service_page, MAX_SERVICES,
};
pub use tech::detect_tech_stack;
pub use testimonials::extract_testimonials;

pub(crate) use seo::JSON_LD;
