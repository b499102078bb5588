//! Scheduler for managing the crawl frontier
//!
//! This module handles:
//! - FIFO queue management for URLs to crawl (breadth-first order)
//! - The visited set keyed by canonical URL
//!
//! The scheduler is owned by a single crawl invocation; nothing is shared
//! between concurrent crawls.

use crate::url::canonicalize;
use std::collections::{HashSet, VecDeque};

/// A URL queued for fetching with its link distance from the start page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// The URL to fetch, as discovered
    pub url: String,

    /// Link distance from the start URL (start page is 0)
    pub depth: u32,
}

/// Scheduler manages the frontier queue and visited set
///
/// URLs are popped in insertion order, so every page at depth `d` is fetched
/// before any page at depth `d + 1`. A URL is marked visited when it is
/// popped, before its fetch begins, so a failed fetch is never retried.
#[derive(Debug, Default)]
pub struct Scheduler {
    /// Pending URLs in discovery order
    frontier: VecDeque<QueuedUrl>,

    /// Canonical URLs already popped
    visited: HashSet<String>,
}

impl Scheduler {
    /// Creates a scheduler seeded with the start URL at depth 0
    pub fn new(start_url: &str) -> Self {
        let mut scheduler = Self::default();
        scheduler.add_to_frontier(start_url.to_string(), 0);
        scheduler
    }

    /// Pops the next unvisited URL and marks it visited
    ///
    /// Entries whose canonical form was already visited are discarded.
    /// Returns the queued entry together with its canonical key.
    pub fn next_url(&mut self) -> Option<(QueuedUrl, String)> {
        while let Some(queued) = self.frontier.pop_front() {
            let key = canonicalize(&queued.url);
            if self.visited.insert(key.clone()) {
                tracing::trace!("Dequeued {} at depth {}", queued.url, queued.depth);
                return Some((queued, key));
            }
        }
        None
    }

    /// Appends a URL to the back of the frontier unless it was already visited
    ///
    /// Duplicates that are still pending are tolerated; `next_url` drops them.
    pub fn add_to_frontier(&mut self, url: String, depth: u32) {
        if self.is_visited(&url) {
            return;
        }
        self.frontier.push_back(QueuedUrl { url, depth });
    }

    /// Whether the canonical form of `url` has been popped
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(&canonicalize(url))
    }

    /// Returns the number of URLs in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Returns how many distinct URLs have been popped
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scheduler() {
        let scheduler = Scheduler::new("https://example.com");

        assert_eq!(scheduler.frontier_size(), 1);
        assert!(!scheduler.is_empty());
        assert_eq!(scheduler.visited_count(), 0);
    }

    #[test]
    fn test_next_url_fifo_order() {
        let mut scheduler = Scheduler::new("https://example.com");
        let (start, _) = scheduler.next_url().unwrap();
        assert_eq!(start.depth, 0);

        scheduler.add_to_frontier("https://example.com/a".to_string(), 1);
        scheduler.add_to_frontier("https://example.com/b".to_string(), 1);
        scheduler.add_to_frontier("https://example.com/a/x".to_string(), 2);

        let order: Vec<String> = std::iter::from_fn(|| scheduler.next_url())
            .map(|(q, _)| q.url)
            .collect();
        assert_eq!(
            order,
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/a/x"
            ]
        );
    }

    #[test]
    fn test_next_url_empty_frontier() {
        let mut scheduler = Scheduler::new("https://example.com");
        scheduler.next_url();

        assert!(scheduler.next_url().is_none());
    }

    #[test]
    fn test_canonical_duplicates_visited_once() {
        let mut scheduler = Scheduler::new("https://example.com/");
        scheduler.add_to_frontier("https://EXAMPLE.com".to_string(), 1);
        scheduler.add_to_frontier("https://example.com/#top".to_string(), 1);

        assert!(scheduler.next_url().is_some());
        assert!(scheduler.next_url().is_none());
        assert_eq!(scheduler.visited_count(), 1);
    }

    #[test]
    fn test_visited_urls_not_requeued() {
        let mut scheduler = Scheduler::new("https://example.com/about");
        let (_, key) = scheduler.next_url().unwrap();
        assert_eq!(key, "https://example.com/about");

        scheduler.add_to_frontier("https://example.com/about/".to_string(), 1);
        assert!(scheduler.is_empty());
        assert!(scheduler.is_visited("https://example.com/about#team"));
    }
}
