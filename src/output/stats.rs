//! Statistics generation from crawl diagnostics
//!
//! This module provides functionality for summarizing and displaying the
//! per-URL visit records of a crawl report.

use crate::crawler::{CrawlReport, RenderFallback};
use crate::state::PageState;
use std::collections::BTreeMap;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Number of URLs dequeued or rendered
    pub total_visits: u64,

    /// Pages kept in the final site record
    pub pages_kept: u64,

    /// Count of visits by state
    pub visits_by_state: BTreeMap<PageState, u64>,

    /// Deepest link level a visit reached
    pub max_depth_reached: u32,

    /// Body characters across kept pages
    pub total_body_chars: u64,

    pub elapsed_ms: u64,

    pub render_fallback: RenderFallback,
}

impl CrawlStatistics {
    /// Summarizes a crawl report
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut visits_by_state = BTreeMap::new();
        for visit in &report.visits {
            *visits_by_state.entry(visit.state).or_insert(0) += 1;
        }

        Self {
            total_visits: report.visits.len() as u64,
            pages_kept: report.site.pages.len() as u64,
            visits_by_state,
            max_depth_reached: report.visits.iter().map(|v| v.depth).max().unwrap_or(0),
            total_body_chars: report
                .site
                .pages
                .iter()
                .map(|p| p.body_chars() as u64)
                .sum(),
            elapsed_ms: report.elapsed_ms,
            render_fallback: report.render_fallback,
        }
    }

    /// Number of visits in a given state
    pub fn count(&self, state: PageState) -> u64 {
        self.visits_by_state.get(&state).copied().unwrap_or(0)
    }

    /// Number of visits that ended in an error state
    pub fn error_count(&self) -> u64 {
        self.visits_by_state
            .iter()
            .filter(|(state, _)| state.is_error())
            .map(|(_, count)| count)
            .sum()
    }

    /// Share of visits that contributed content, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_visits == 0 {
            return 0.0;
        }
        let succeeded: u64 = self
            .visits_by_state
            .iter()
            .filter(|(state, _)| state.is_success())
            .map(|(_, count)| count)
            .sum();
        (succeeded as f64 / self.total_visits as f64) * 100.0
    }
}

/// Prints statistics to stderr in a formatted manner
///
/// Standard output is reserved for the crawl result itself.
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    eprintln!("=== Crawl Statistics ===\n");

    eprintln!("Overview:");
    eprintln!("  URLs visited: {}", stats.total_visits);
    eprintln!("  Pages kept: {}", stats.pages_kept);
    eprintln!("  Body text: {} chars", stats.total_body_chars);
    eprintln!("  Deepest level: {}", stats.max_depth_reached);
    eprintln!("  Elapsed: {} ms", stats.elapsed_ms);
    eprintln!("  Rendering fallback: {:?}", stats.render_fallback);
    eprintln!();

    eprintln!("Visits by State:");
    // Sort states by count (descending)
    let mut state_counts: Vec<_> = stats.visits_by_state.iter().collect();
    state_counts.sort_by(|a, b| b.1.cmp(a.1));

    for (state, count) in state_counts {
        let percentage = if stats.total_visits > 0 {
            (*count as f64 / stats.total_visits as f64) * 100.0
        } else {
            0.0
        };
        eprintln!("  {}: {} ({:.1}%)", state, count, percentage);
    }
    eprintln!();

    eprintln!(
        "Success Rate: {:.1}% ({} errors)",
        stats.success_rate(),
        stats.error_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::CrawledSite;
    use crate::state::PageVisit;
    use chrono::Utc;

    fn report(visits: Vec<PageVisit>) -> CrawlReport {
        CrawlReport {
            site: CrawledSite::empty("https://acme.com"),
            visits,
            started_at: Utc::now(),
            elapsed_ms: 1200,
            render_fallback: RenderFallback::NotNeeded,
        }
    }

    #[test]
    fn test_statistics_from_report() {
        let stats = CrawlStatistics::from_report(&report(vec![
            PageVisit::new("https://acme.com/", 0, PageState::Processed),
            PageVisit::new("https://acme.com/about", 1, PageState::Processed),
            PageVisit::new("https://acme.com/menu.pdf", 1, PageState::SkippedAsset),
            PageVisit::new("https://acme.com/old", 2, PageState::DeadLink),
        ]));

        assert_eq!(stats.total_visits, 4);
        assert_eq!(stats.count(PageState::Processed), 2);
        assert_eq!(stats.count(PageState::Rendered), 0);
        assert_eq!(stats.error_count(), 1);
        assert_eq!(stats.max_depth_reached, 2);
        assert!((stats.success_rate() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_success_rate_no_visits() {
        let stats = CrawlStatistics::from_report(&report(vec![]));
        assert_eq!(stats.success_rate(), 0.0);
        assert_eq!(stats.pages_kept, 0);
    }
}
