//! Bizcrawl main entry point
//!
//! This is the command-line interface for the Bizcrawl website crawler.

use anyhow::Context;
use bizcrawl::config::{load_config, Config};
use bizcrawl::output::{print_statistics, render_site, CrawlStatistics, OutputFormat};
use bizcrawl::SiteCrawler;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Bizcrawl: business website crawler and extractor
///
/// Bizcrawl crawls a small business website under page, depth and time
/// budgets, falls back to a rendering proxy when the static HTML is too
/// thin, and prints the extracted site record.
#[derive(Parser, Debug)]
#[command(name = "bizcrawl")]
#[command(version)]
#[command(about = "Business website crawler and extractor", long_about = None)]
struct Cli {
    /// Website to crawl (scheme optional)
    #[arg(value_name = "URL", required_unless_present = "profile")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Print crawl statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Profile these homepages instead of crawling (repeatable)
    #[arg(long, value_name = "URL", conflicts_with = "url")]
    profile: Vec<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => Config::default(),
    };

    let crawler = SiteCrawler::new(config)?;

    if !cli.profile.is_empty() {
        handle_profile(&crawler, &cli.profile).await?;
    } else if let Some(url) = &cli.url {
        handle_crawl(&crawler, url, cli.format, cli.stats).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the result document.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bizcrawl=info,warn"),
            1 => EnvFilter::new("bizcrawl=debug,info"),
            2 => EnvFilter::new("bizcrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Crawls one site and prints the result
async fn handle_crawl(
    crawler: &SiteCrawler,
    url: &str,
    format: OutputFormat,
    stats: bool,
) -> anyhow::Result<()> {
    tracing::info!(
        "Crawling {} (max {} pages, depth {})",
        url,
        crawler.config().crawler.max_pages,
        crawler.config().crawler.max_depth
    );

    let report = crawler.crawl(url).await;
    if report.site.is_empty() {
        tracing::warn!("No data available for {}", url);
    }

    println!("{}", render_site(&report.site, format)?);

    if stats {
        print_statistics(&CrawlStatistics::from_report(&report));
    }

    Ok(())
}

/// Profiles several homepages and prints them as JSON
async fn handle_profile(crawler: &SiteCrawler, urls: &[String]) -> anyhow::Result<()> {
    let profiles = crawler.profile_competitors(urls).await;
    let failed = profiles.iter().filter(|p| p.is_none()).count();
    if failed > 0 {
        tracing::warn!("{} of {} homepages could not be profiled", failed, urls.len());
    }

    println!("{}", serde_json::to_string_pretty(&profiles)?);
    Ok(())
}
