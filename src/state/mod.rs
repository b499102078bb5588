//! State module for crawl diagnostics
//!
//! Skipped and failed URLs never abort a crawl, but each one is recorded as a
//! `PageVisit` so a thin result can be explained after the fact.
//!
//! # Components
//!
//! - `PageState`: How a dequeued URL ended (processed, skipped, or which failure)
//! - `PageVisit`: One dequeued URL with its depth, state and failure detail

mod page_state;

// Re-export main types
pub use page_state::PageState;

use serde::Serialize;

/// One URL taken off the frontier (or sent to the rendering proxy)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageVisit {
    /// Canonical URL
    pub url: String,
    /// Link depth from the base URL
    pub depth: u32,
    pub state: PageState,
    /// Failure description, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl PageVisit {
    pub fn new(url: impl Into<String>, depth: u32, state: PageState) -> Self {
        Self {
            url: url.into(),
            depth,
            state,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
