//! Pull-request activity types.
//!
//! These mirror the shape of the provider's GraphQL activity payload
//! (camelCase on the wire) so the JSON output of the activity view
//! reads like the upstream data it was filtered from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single comment on a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Login of the comment author.
    pub author: String,
    /// Comment body text.
    pub body: String,
    /// When the comment was created (UTC).
    pub created_at: DateTime<Utc>,
}

/// A commit reference attached to a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRef {
    /// Name of the commit author.
    pub author: String,
    /// First line of the commit message.
    pub message_headline: String,
    /// Full commit hash.
    pub oid: String,
    /// When the commit was committed (UTC).
    pub committed_at: DateTime<Utc>,
}

/// A pull request with its nested comments and commits.
///
/// The nested sequences keep the relative order the provider returned
/// them in; filtering only removes elements, it never re-sorts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    /// Login of the pull request author.
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub comments: Vec<Comment>,
    pub commits: Vec<CommitRef>,
}

/// The shaped activity view: a human-readable window description plus
/// the pull requests that survived the time-window filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityReport {
    /// E.g. "Showing activity since 2026-07-30T12:00:00+00:00".
    pub info: String,
    pub filtered_pull_requests: Vec<PullRequest>,
}

/// Outcome of an activity fetch.
///
/// Provider-side GraphQL errors are a recoverable, fully-visible
/// failure: they are carried verbatim instead of being raised.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ActivityOutcome {
    Report(ActivityReport),
    /// The verbatim `errors` array from the GraphQL response body.
    ProviderErrors {
        errors: serde_json::Value,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_with_camel_case_keys() {
        let report = ActivityReport {
            info: "Showing activity since 2026-07-30T00:00:00+00:00".to_string(),
            filtered_pull_requests: Vec::new(),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("filteredPullRequests").is_some());
        assert!(json.get("info").is_some());
    }

    #[test]
    fn provider_errors_serialize_verbatim() {
        let errors = serde_json::json!([{"message": "Could not resolve repository"}]);
        let outcome = ActivityOutcome::ProviderErrors {
            errors: errors.clone(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["errors"], errors);
    }

    #[test]
    fn pull_request_round_trips_timestamps_as_rfc3339() {
        let json = serde_json::json!({
            "number": 42,
            "title": "Fix flaky test",
            "author": "octocat",
            "createdAt": "2026-08-01T09:30:00Z",
            "updatedAt": "2026-08-02T10:00:00Z",
            "comments": [],
            "commits": []
        });
        let pr: PullRequest = serde_json::from_value(json).unwrap();
        assert_eq!(pr.number, 42);
        assert_eq!(pr.updated_at.to_rfc3339(), "2026-08-02T10:00:00+00:00");
    }
}
