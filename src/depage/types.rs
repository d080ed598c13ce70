//! Depagination state types

use serde::{Deserialize, Serialize};

/// Pagination metadata attached under a paginated field before
/// depagination, and removed from the final output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Opaque token identifying the next page, if any
    #[serde(default)]
    pub end_cursor: Option<String>,
    /// Whether the upstream reports more pages
    #[serde(default)]
    pub has_next_page: bool,
}

/// Lifecycle of a single cursor's merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting on the executor for the next page
    #[default]
    Fetching,
    /// Appending a fetched page's nodes
    Merging,
    /// Pagination exhausted; nested fan-out (if any) may begin
    Done,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Phase::Fetching => "fetching",
            Phase::Merging => "merging",
            Phase::Done => "done",
        };
        f.write_str(label)
    }
}

/// Tracks merge progress for one cursor while its pages are drained.
#[derive(Debug, Clone, Default)]
pub struct MergeState {
    /// Current lifecycle phase
    pub phase: Phase,
    /// Pages fetched beyond the first
    pub pages_fetched: u32,
    /// Nodes appended from fetched pages
    pub nodes_merged: usize,
    /// Cursor value used for the most recent fetch
    pub cursor: Option<String>,
}

impl MergeState {
    /// Create a fresh state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a page fetch driven by `cursor`.
    pub fn fetched(&mut self, cursor: String) {
        self.phase = Phase::Fetching;
        self.cursor = Some(cursor);
        self.pages_fetched += 1;
    }

    /// Record `count` nodes appended from the fetched page.
    pub fn merged(&mut self, count: usize) {
        self.phase = Phase::Merging;
        self.nodes_merged += count;
    }

    /// Mark the cursor as fully drained.
    pub fn done(&mut self) {
        self.phase = Phase::Done;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_info_field_names() {
        let info: PageInfo =
            serde_json::from_value(serde_json::json!({"endCursor": "c1", "hasNextPage": true}))
                .unwrap();
        assert_eq!(info.end_cursor.as_deref(), Some("c1"));
        assert!(info.has_next_page);

        let info: PageInfo =
            serde_json::from_value(serde_json::json!({"endCursor": null, "hasNextPage": false}))
                .unwrap();
        assert!(info.end_cursor.is_none());
        assert!(!info.has_next_page);
    }

    #[test]
    fn test_merge_state_lifecycle() {
        let mut state = MergeState::new();
        assert_eq!(state.phase, Phase::Fetching);

        state.fetched("c1".to_string());
        assert_eq!(state.pages_fetched, 1);
        assert_eq!(state.cursor.as_deref(), Some("c1"));

        state.merged(3);
        assert_eq!(state.phase, Phase::Merging);
        assert_eq!(state.nodes_merged, 3);

        state.done();
        assert_eq!(state.phase, Phase::Done);
        assert_eq!(state.phase.to_string(), "done");
    }
}
