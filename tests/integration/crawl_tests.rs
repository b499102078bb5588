//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end: frontier budgets, diagnostics,
//! the rendering fallback and extraction.

use bizcrawl::config::Config;
use bizcrawl::crawler::RenderFallback;
use bizcrawl::state::PageState;
use bizcrawl::{crawl_website, CrawlReport, SiteCrawler};
use std::time::Duration;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration whose rendering proxy lives on the mock server
fn create_test_config(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.crawler.page_timeout_ms = 2_000;
    config.crawler.crawl_timeout_ms = 10_000;
    config.render.endpoint = format!("{}/render/", server.uri());
    config.render.timeout_ms = 2_000;
    config.user_agent.crawler_name = "TestBot".to_string();
    config
}

fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        ),
        "text/html; charset=utf-8",
    )
}

/// Enough prose to stay above the thin-content threshold on its own
fn filler() -> String {
    format!("<p>{}</p>", "Family owned and serving the valley for decades. ".repeat(12))
}

async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// A rendering proxy that must never be called
async fn forbid_render(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex("^/render/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(server)
        .await;
}

async fn crawl(config: Config, url: &str) -> CrawlReport {
    SiteCrawler::new(config)
        .expect("Failed to build crawler")
        .crawl(url)
        .await
}

fn count_state(report: &CrawlReport, state: PageState) -> usize {
    report.visits.iter().filter(|v| v.state == state).count()
}

#[tokio::test]
async fn test_each_canonical_url_fetched_once() {
    let server = MockServer::start().await;
    let base = server.uri();

    // Homepage is fetched twice: once by the crawl, once for brand and tech markup
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Acme Plumbing",
            &format!(
                r##"{}<a href="/about">About</a>
                <a href="/about/">About again</a>
                <a href="/about#team">Team</a>
                <a href="{}/services">Services</a>"##,
                filler(),
                base
            ),
        ))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("About", r#"<p>Our story.</p><a href="/">Home</a>"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(html_page(
            "Services",
            r#"<p>What we do.</p><a href="/about">About</a><a href="/">Home</a>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    forbid_render(&server).await;

    let report = crawl(create_test_config(&server), &base).await;

    assert_eq!(report.site.pages.len(), 3);
    assert_eq!(report.visits.len(), 3);
    assert_eq!(count_state(&report, PageState::Processed), 3);
    assert_eq!(report.render_fallback, RenderFallback::NotNeeded);
    assert_eq!(report.site.homepage().map(|p| p.url.clone()), Some(format!("{}/", base)));

    // Breadth-first: depth never decreases along the visit order
    let depths: Vec<u32> = report.visits.iter().map(|v| v.depth).collect();
    assert_eq!(depths, vec![0, 1, 1]);
}

#[tokio::test]
async fn test_max_pages_budget() {
    let server = MockServer::start().await;
    let links: String = (1..=6)
        .map(|i| format!(r#"<a href="/page{}">Page {}</a>"#, i, i))
        .collect();
    mount_page(&server, "/", html_page("Home", &format!("{}{}", filler(), links))).await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/page\d$"))
        .respond_with(html_page("Page", "<p>More content here.</p>"))
        .mount(&server)
        .await;

    let mut config = create_test_config(&server);
    config.crawler.max_pages = 3;
    config.render.enabled = false;

    let report = crawl(config, &server.uri()).await;

    assert_eq!(report.site.pages.len(), 3);
    assert_eq!(report.visits.len(), 3);
}

#[tokio::test]
async fn test_max_depth_budget() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page("Home", &format!(r#"{}<a href="/level1">Next</a>"#, filler())),
    )
    .await;
    mount_page(
        &server,
        "/level1",
        html_page("Level 1", r#"<p>One deep.</p><a href="/level2">Deeper</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/level2"))
        .respond_with(html_page("Level 2", "<p>Too deep.</p>"))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = create_test_config(&server);
    config.crawler.max_depth = 1;
    config.render.enabled = false;

    let report = crawl(config, &server.uri()).await;

    assert_eq!(report.site.pages.len(), 2);
    assert!(report.visits.iter().all(|v| v.depth <= 1));
    assert!(!report.visits.iter().any(|v| v.url.ends_with("/level2")));
}

#[tokio::test]
async fn test_max_depth_zero_crawls_only_base() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page("Home", &format!(r#"{}<a href="/about">About</a>"#, filler())),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("About", "<p>About us.</p>"))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = create_test_config(&server);
    config.crawler.max_depth = 0;
    config.render.enabled = false;

    let report = crawl(config, &server.uri()).await;

    assert_eq!(report.site.pages.len(), 1);
    assert_eq!(report.visits.len(), 1);
}

#[tokio::test]
async fn test_crawl_time_budget() {
    let server = MockServer::start().await;
    let links: String = (1..=8)
        .map(|i| format!(r#"<a href="/slow{}">Slow {}</a>"#, i, i))
        .collect();
    mount_page(&server, "/", html_page("Home", &format!("{}{}", filler(), links))).await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/slow\d$"))
        .respond_with(html_page("Slow", "<p>Eventually.</p>").set_delay(Duration::from_millis(150)))
        .mount(&server)
        .await;

    let mut config = create_test_config(&server);
    config.crawler.crawl_timeout_ms = 200;
    config.render.enabled = false;

    let report = crawl(config, &server.uri()).await;

    assert!(!report.site.is_empty());
    assert!(report.site.pages.len() < 9);
    assert!(report.visits.len() < 9);
}

#[tokio::test]
async fn test_render_recovers_unreachable_homepage() {
    let server = MockServer::start().await;
    mount_page(&server, "/", ResponseTemplate::new(503)).await;
    Mock::given(method("GET"))
        .and(path_regex("^/render/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "# Acme Roofing\n\nFamily owned roofers serving the valley since 1987. \
             Call (555) 987-6543 for a free estimate.",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let report = crawl(create_test_config(&server), &server.uri()).await;

    assert_eq!(report.render_fallback, RenderFallback::RecoveredEmpty);
    assert!(!report.site.is_empty());
    assert_eq!(report.site.pages.len(), 1);
    assert_eq!(count_state(&report, PageState::HttpError), 1);
    assert_eq!(count_state(&report, PageState::Rendered), 1);

    // No homepage markup, so brand comes from the rendered title
    assert_eq!(report.site.brand_info.business_name, "Acme Roofing");
    assert_eq!(report.site.contact_info.phone.as_deref(), Some("(555) 987-6543"));
    assert!(report.site.tech_stack.is_empty());
}

#[tokio::test]
async fn test_empty_body_returns_sentinel() {
    let server = MockServer::start().await;
    mount_page(&server, "/", html_page("Loading", r#"<div id="root"></div>"#)).await;

    let mut config = create_test_config(&server);
    config.render.enabled = false;

    let report = crawl(config, &server.uri()).await;

    assert!(report.site.is_empty());
    assert!(report.site.services.is_empty());
    assert_eq!(report.site.brand_info.business_name, "");
    assert_eq!(report.render_fallback, RenderFallback::Attempted);
    assert_eq!(count_state(&report, PageState::Processed), 1);
}

#[tokio::test]
async fn test_thin_content_just_below_threshold_tries_render() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page("Thin", &format!("<p>{}</p>", "a".repeat(499))),
    )
    .await;
    Mock::given(method("GET"))
        .and(path_regex("^/render/"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let report = crawl(create_test_config(&server), &server.uri()).await;

    assert_eq!(report.render_fallback, RenderFallback::Attempted);
    assert_eq!(report.site.pages.len(), 1);
    assert_eq!(report.site.pages[0].body_text.len(), 499);
}

#[tokio::test]
async fn test_content_at_threshold_skips_render() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page("Enough", &format!("<p>{}</p>", "a".repeat(500))),
    )
    .await;
    forbid_render(&server).await;

    let report = crawl(create_test_config(&server), &server.uri()).await;

    assert_eq!(report.render_fallback, RenderFallback::NotNeeded);
    assert_eq!(count_state(&report, PageState::Rendered), 0);
}

#[tokio::test]
async fn test_thin_site_rendered_with_key_subpages() {
    let server = MockServer::start().await;
    let base = server.uri();
    mount_page(&server, "/", html_page("Acme", r#"<div id="app">Loading</div>"#)).await;

    let homepage_md = format!(
        "# Acme Roofing\n\n{}\n\n[Our Services]({base}/services) [About]({base}/about) [Gallery]({base}/gallery)\n",
        "We replace and repair roofs across the valley. ".repeat(8),
        base = base
    );
    Mock::given(method("GET"))
        .and(path_regex(r"^/render/.*/services$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "# Services\n\n## Roof Repair\n\n{}",
            "Leaks fixed quickly by certified crews. ".repeat(5)
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/render/.*/about$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "# About\n\nTiny page with barely anything on it at all.",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/render/.*/gallery$"))
        .respond_with(ResponseTemplate::new(200).set_body_string("# Gallery"))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/render/http://[^/]+/?$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(homepage_md))
        .expect(1)
        .mount(&server)
        .await;

    let report = crawl(create_test_config(&server), &base).await;

    assert_eq!(report.render_fallback, RenderFallback::RecoveredThin);
    // Rendered homepage replaced page 0; the thin about page was dropped
    assert_eq!(report.site.pages.len(), 2);
    assert_eq!(report.site.pages[0].title, "Acme Roofing");
    assert!(report.site.pages[1].url.ends_with("/services"));
    assert_eq!(count_state(&report, PageState::Rendered), 2);
}

#[tokio::test]
async fn test_failures_are_recorded_in_diagnostics() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page(
            "Home",
            &format!(
                r#"{}<a href="/gone">Old</a><a href="/menu">Menu</a><a href="/brochure.pdf">PDF</a>"#,
                filler()
            ),
        ),
    )
    .await;
    mount_page(&server, "/gone", ResponseTemplate::new(404)).await;
    mount_page(
        &server,
        "/menu",
        ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/brochure.pdf"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = create_test_config(&server);
    config.render.enabled = false;

    let report = crawl(config, &server.uri()).await;

    assert_eq!(report.site.pages.len(), 1);
    assert_eq!(report.visits.len(), 4);

    let find = |suffix: &str| {
        report
            .visits
            .iter()
            .find(|v| v.url.ends_with(suffix))
            .expect("visit recorded")
    };
    assert_eq!(find("/gone").state, PageState::DeadLink);
    assert_eq!(find("/gone").detail.as_deref(), Some("HTTP 404"));
    assert_eq!(find("/menu").state, PageState::ContentMismatch);
    assert_eq!(find("/brochure.pdf").state, PageState::SkippedAsset);
}

#[tokio::test]
async fn test_end_to_end_extraction() {
    let server = MockServer::start().await;
    let homepage = ResponseTemplate::new(200)
        .insert_header("server", "nginx/1.24.0")
        .set_body_raw(
            format!(
                r#"<html><head>
                <title>Acme Plumbing | Springfield</title>
                <meta name="description" content="Springfield's trusted plumbers.">
                <meta property="og:site_name" content="Acme Plumbing Co">
                <meta name="generator" content="WordPress 6.4">
                </head><body>
                <nav><a href="/services">Services</a></nav>
                <h1>Welcome to Acme Plumbing</h1>
                {}
                <h2>Our Services</h2>
                <h3>Drain Cleaning</h3>
                <p>We clear clogs fast. Same day visits available.</p>
                <p>Call (555) 123-4567 today or <a href="/services">see every service</a>.</p>
                <a href="mailto:info@acme-plumbing.com?subject=Quote">Email us</a>
                </body></html>"#,
                filler()
            ),
            "text/html; charset=utf-8",
        );
    mount_page(&server, "/", homepage).await;
    mount_page(
        &server,
        "/services",
        html_page(
            "Services",
            "<h1>Water Heater Repair</h1><p>Tank and tankless units repaired.</p>",
        ),
    )
    .await;
    forbid_render(&server).await;

    let report = crawl(create_test_config(&server), &server.uri()).await;
    let site = &report.site;

    assert_eq!(site.pages.len(), 2);
    assert_eq!(site.brand_info.business_name, "Acme Plumbing Co");
    assert_eq!(site.contact_info.phone.as_deref(), Some("(555) 123-4567"));
    assert_eq!(site.contact_info.email.as_deref(), Some("info@acme-plumbing.com"));
    assert_eq!(site.seo_meta.description, "Springfield's trusted plumbers.");

    let names: Vec<&str> = site.services.iter().map(|s| s.name.as_str()).collect();
    assert!(names.contains(&"Drain Cleaning"));
    assert!(names.contains(&"Water Heater Repair"));
    assert!(!names.contains(&"Welcome to Acme Plumbing"));

    assert!(site.tech_stack.contains(&"WordPress".to_string()));
    assert!(site.tech_stack.contains(&"Nginx".to_string()));
}

#[tokio::test]
async fn test_profile_competitors_isolates_failures() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/",
        html_page(
            "Rival",
            r#"<h2>Drain Cleaning</h2><p>Fast service, call (555) 222-3333.</p><a href="/blog">Blog</a>"#,
        ),
    )
    .await;
    mount_page(&server, "/missing", ResponseTemplate::new(404)).await;

    let crawler = SiteCrawler::new(create_test_config(&server)).expect("Failed to build crawler");
    let urls = vec![server.uri(), format!("{}/missing", server.uri())];
    let profiles = crawler.profile_competitors(&urls).await;

    assert_eq!(profiles.len(), 2);
    let profile = profiles[0].as_ref().expect("first homepage profiled");
    assert_eq!(profile.service_count, 1);
    assert!(profile.has_blog);
    assert!(!profile.has_schema);
    assert_eq!(profile.contact.phone.as_deref(), Some("(555) 222-3333"));
    assert!(profiles[1].is_none());
}

#[tokio::test]
async fn test_invalid_url_returns_sentinel() {
    let site = crawl_website("http://").await;
    assert!(site.is_empty());
    assert!(site.services.is_empty());
}
