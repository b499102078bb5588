/// Page outcome definitions for crawl diagnostics
///
/// Every URL the crawl controller dequeues ends in exactly one of these states.
use serde::Serialize;
use std::fmt;

/// Represents how a dequeued URL contributed to the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    // ===== Success States =====
    /// Page was fetched statically and parsed
    Processed,

    /// Page came from the rendering proxy
    Rendered,

    // ===== Skip States =====
    /// URL points at a binary/document/style/script asset
    SkippedAsset,

    // ===== Error States =====
    /// Page returned HTTP 404 or 410
    DeadLink,

    /// Page returned HTTP 429
    RateLimited,

    /// Page returned any other non-2xx status
    HttpError,

    /// Page Content-Type is not HTML
    ContentMismatch,

    /// Page could not be reached (timeout, connection refused, DNS failure)
    Unreachable,

    /// Page fetch failed for other reasons (body decode, redirect loop, bad URL)
    Failed,
}

impl PageState {
    /// Returns true if this page contributed content to the crawl
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Processed | Self::Rendered)
    }

    /// Returns true if the URL was skipped without a request
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::SkippedAsset)
    }

    /// Returns true if this represents a failed request
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::DeadLink
                | Self::RateLimited
                | Self::HttpError
                | Self::ContentMismatch
                | Self::Unreachable
                | Self::Failed
        )
    }

    /// Stable snake_case label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Rendered => "rendered",
            Self::SkippedAsset => "skipped_asset",
            Self::DeadLink => "dead_link",
            Self::RateLimited => "rate_limited",
            Self::HttpError => "http_error",
            Self::ContentMismatch => "content_mismatch",
            Self::Unreachable => "unreachable",
            Self::Failed => "failed",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Processed,
            Self::Rendered,
            Self::SkippedAsset,
            Self::DeadLink,
            Self::RateLimited,
            Self::HttpError,
            Self::ContentMismatch,
            Self::Unreachable,
            Self::Failed,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_success() {
        assert!(PageState::Processed.is_success());
        assert!(PageState::Rendered.is_success());

        assert!(!PageState::SkippedAsset.is_success());
        assert!(!PageState::Failed.is_success());
    }

    #[test]
    fn test_is_skipped() {
        assert!(PageState::SkippedAsset.is_skipped());
        assert!(!PageState::Processed.is_skipped());
        assert!(!PageState::Unreachable.is_skipped());
    }

    #[test]
    fn test_is_error() {
        assert!(PageState::DeadLink.is_error());
        assert!(PageState::RateLimited.is_error());
        assert!(PageState::HttpError.is_error());
        assert!(PageState::ContentMismatch.is_error());
        assert!(PageState::Unreachable.is_error());
        assert!(PageState::Failed.is_error());

        assert!(!PageState::Processed.is_error());
        assert!(!PageState::SkippedAsset.is_error());
    }

    #[test]
    fn test_every_state_is_exactly_one_kind() {
        for state in PageState::all_states() {
            let kinds = [state.is_success(), state.is_skipped(), state.is_error()];
            assert_eq!(
                kinds.iter().filter(|k| **k).count(),
                1,
                "{:?} must be exactly one of success/skip/error",
                state
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PageState::Processed), "processed");
        assert_eq!(format!("{}", PageState::SkippedAsset), "skipped_asset");
        assert_eq!(format!("{}", PageState::DeadLink), "dead_link");
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&PageState::ContentMismatch).unwrap();
        assert_eq!(json, "\"content_mismatch\"");
    }
}
