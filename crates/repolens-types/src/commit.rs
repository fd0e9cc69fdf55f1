//! Single-commit view types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::branch::short_sha;

/// A single commit shaped for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    /// Full commit hash.
    pub sha: String,
    /// 7-character display hash.
    pub short_sha: String,
    /// Name of the commit author.
    pub author: String,
    /// Full commit message.
    pub message: String,
    pub committed_at: DateTime<Utc>,
}

impl CommitDetail {
    /// Build a detail view from the full hash and commit fields,
    /// deriving the display hash.
    pub fn new(
        sha: String,
        author: String,
        message: String,
        committed_at: DateTime<Utc>,
    ) -> Self {
        let short = short_sha(&sha);
        Self {
            sha,
            short_sha: short,
            author,
            message,
            committed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn new_derives_display_hash_and_keeps_full_sha() {
        let sha = "0123456789abcdef0123456789abcdef01234567".to_string();
        let detail = CommitDetail::new(
            sha.clone(),
            "octocat".to_string(),
            "Initial commit".to_string(),
            Utc::now(),
        );
        assert_eq!(detail.short_sha, "0123456");
        assert_eq!(detail.sha, sha);
    }
}
