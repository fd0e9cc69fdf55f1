//! Branch comparison types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of hash characters shown in shaped views.
///
/// Display-only shortening: collisions within a displayed set are not
/// guarded against, so the full sha is always carried alongside and is
/// the only form ever used as a key.
pub const SHORT_SHA_LEN: usize = 7;

/// Shorten a full commit hash to its display prefix.
pub fn short_sha(sha: &str) -> String {
    sha.chars().take(SHORT_SHA_LEN).collect()
}

/// A commit as it appears in an ahead/behind listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffCommit {
    /// 7-character display hash.
    pub short_sha: String,
    /// Full commit hash.
    pub sha: String,
    /// First line of the commit message.
    pub message: String,
    /// Name of the commit author.
    pub author: String,
}

/// Ahead/behind commit sets for one branch relative to the default
/// branch. `ahead` and `behind` keep the order the provider returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchDiff {
    pub branch: String,
    pub ahead: Vec<DiffCommit>,
    pub behind: Vec<DiffCommit>,
}

/// The shaped branch-diff view.
#[derive(Debug, Clone, Serialize)]
pub struct BranchDiffReport {
    pub default_branch: String,
    pub diffs: Vec<BranchDiff>,
}

/// Raw mode: every unprocessed REST response from a branch-diff run,
/// for debugging and inspection. No shaping is applied.
#[derive(Debug, Clone, Serialize)]
pub struct RawBranchData {
    pub repository_info: serde_json::Value,
    pub branches_list: serde_json::Value,
    pub comparisons: Vec<serde_json::Value>,
}

/// One branch in the summary view.
///
/// `first_change` is the timestamp of the first commit diverging from
/// the default branch; when nothing diverges it equals `latest_change`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub latest_change: DateTime<Utc>,
    pub first_change: DateTime<Utc>,
}

/// The shaped branch-summary view.
#[derive(Debug, Clone, Serialize)]
pub struct BranchSummary {
    pub default_branch: String,
    pub branches: Vec<Branch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_sha_takes_first_seven_characters() {
        let full = "a3f9c2e17b4d8a6f0e5c9b2d4a8f6e1c3b7d9a50";
        assert_eq!(full.len(), 40);
        assert_eq!(short_sha(full), "a3f9c2e");
    }

    #[test]
    fn short_sha_of_short_input_is_unchanged() {
        assert_eq!(short_sha("abc"), "abc");
    }

    #[test]
    fn raw_data_serializes_with_expected_keys() {
        let raw = RawBranchData {
            repository_info: serde_json::json!({"default_branch": "main"}),
            branches_list: serde_json::json!([]),
            comparisons: vec![serde_json::json!({"ahead_by": 0})],
        };
        let json = serde_json::to_value(&raw).unwrap();
        assert!(json.get("repository_info").is_some());
        assert!(json.get("branches_list").is_some());
        assert!(json.get("comparisons").is_some());
    }
}
