//! Pull-request activity aggregation.
//!
//! One GraphQL query fetches the most recently updated pull requests
//! with their nested comments and commits; the result is then filtered
//! down to a 30-day lookback window. Provider-side GraphQL errors are
//! surfaced verbatim in the payload rather than raised -- the transport
//! succeeded and the body is worth showing.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use repolens_types::activity::{
    ActivityOutcome, ActivityReport, Comment, CommitRef, PullRequest,
};
use repolens_types::error::ProviderError;

use crate::provider::ProviderApi;

/// Fixed lookback window for the activity view.
pub const LOOKBACK_DAYS: i64 = 30;

/// Pull requests fetched per repository (most recently updated first).
const PULL_REQUEST_PAGE: u32 = 30;

/// Comments and commits fetched per pull request. Provider-side limit;
/// there is no pagination beyond this first page.
const NESTED_PAGE: u32 = 50;

const ACTIVITY_QUERY: &str = r#"
query RecentActivity($owner: String!, $name: String!, $prCount: Int!, $nestedCount: Int!) {
  repository(owner: $owner, name: $name) {
    nameWithOwner
    pullRequests(first: $prCount, orderBy: {field: UPDATED_AT, direction: DESC}) {
      nodes {
        number
        title
        createdAt
        updatedAt
        author { login }
        comments(first: $nestedCount) {
          nodes {
            author { login }
            bodyText
            createdAt
          }
        }
        commits(first: $nestedCount) {
          nodes {
            commit {
              author { name }
              messageHeadline
              oid
              committedDate
            }
          }
        }
      }
    }
  }
}
"#;

// Wire shapes for the GraphQL response. Deleted accounts surface as a
// null author; those map to "unknown".

#[derive(Debug, Deserialize)]
struct ActivityData {
    repository: Option<RepositoryNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    pull_requests: NodeList<PullRequestNode>,
}

#[derive(Debug, Deserialize)]
struct NodeList<T> {
    nodes: Vec<T>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestNode {
    number: u64,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author: Option<Actor>,
    comments: NodeList<CommentNode>,
    commits: NodeList<CommitEdge>,
}

#[derive(Debug, Deserialize)]
struct Actor {
    login: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentNode {
    author: Option<Actor>,
    body_text: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct CommitEdge {
    commit: CommitNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommitNode {
    author: Option<CommitAuthor>,
    message_headline: String,
    oid: String,
    committed_date: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct CommitAuthor {
    name: Option<String>,
}

impl From<PullRequestNode> for PullRequest {
    fn from(node: PullRequestNode) -> Self {
        Self {
            number: node.number,
            title: node.title,
            author: login_or_unknown(node.author),
            created_at: node.created_at,
            updated_at: node.updated_at,
            comments: node
                .comments
                .nodes
                .into_iter()
                .map(|c| Comment {
                    author: login_or_unknown(c.author),
                    body: c.body_text,
                    created_at: c.created_at,
                })
                .collect(),
            commits: node
                .commits
                .nodes
                .into_iter()
                .map(|e| CommitRef {
                    author: e
                        .commit
                        .author
                        .and_then(|a| a.name)
                        .unwrap_or_else(|| "unknown".to_string()),
                    message_headline: e.commit.message_headline,
                    oid: e.commit.oid,
                    committed_at: e.commit.committed_date,
                })
                .collect(),
        }
    }
}

fn login_or_unknown(actor: Option<Actor>) -> String {
    actor
        .map(|a| a.login)
        .unwrap_or_else(|| "unknown".to_string())
}

/// Keep pull requests updated at or after `cutoff`, then trim each
/// survivor's comments and commits to the same window.
///
/// Pull requests older than the cutoff are dropped without inspecting
/// their children. Relative order is preserved throughout; a surviving
/// pull request with every nested item filtered out is valid output.
pub fn filter_pull_requests(
    pull_requests: Vec<PullRequest>,
    cutoff: DateTime<Utc>,
) -> Vec<PullRequest> {
    pull_requests
        .into_iter()
        .filter(|pr| pr.updated_at >= cutoff)
        .map(|mut pr| {
            pr.comments.retain(|c| c.created_at >= cutoff);
            pr.commits.retain(|c| c.committed_at >= cutoff);
            pr
        })
        .collect()
}

/// Fetches and time-filters repository activity.
pub struct ActivityService<A> {
    api: A,
}

impl<A: ProviderApi> ActivityService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Fetch activity for `owner/name` with the cutoff anchored at the
    /// current instant.
    pub async fn run(&self, owner: &str, name: &str) -> Result<ActivityOutcome, ProviderError> {
        self.run_at(owner, name, Utc::now()).await
    }

    /// Same as [`run`](Self::run) with an explicit `now`, so the
    /// filter is deterministic under test.
    pub async fn run_at(
        &self,
        owner: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<ActivityOutcome, ProviderError> {
        let variables = json!({
            "owner": owner,
            "name": name,
            "prCount": PULL_REQUEST_PAGE,
            "nestedCount": NESTED_PAGE,
        });

        let body = self.api.graphql(ACTIVITY_QUERY, variables).await?;

        if let Some(errors) = body.get("errors").filter(|e| !e.is_null()) {
            tracing::warn!(%owner, %name, "activity query returned provider-side errors");
            return Ok(ActivityOutcome::ProviderErrors {
                errors: errors.clone(),
            });
        }

        let data: ActivityData =
            serde_json::from_value(body.get("data").cloned().unwrap_or(Value::Null))
                .map_err(|e| ProviderError::Decode(e.to_string()))?;

        let repository = data.repository.ok_or_else(|| {
            ProviderError::Decode("response body has no repository object".to_string())
        })?;

        let pull_requests: Vec<PullRequest> = repository
            .pull_requests
            .nodes
            .into_iter()
            .map(PullRequest::from)
            .collect();

        let cutoff = now - Duration::days(LOOKBACK_DAYS);
        let filtered = filter_pull_requests(pull_requests, cutoff);
        tracing::debug!(%owner, %name, kept = filtered.len(), "filtered activity window");

        Ok(ActivityOutcome::Report(ActivityReport {
            info: format!("Showing activity since {}", cutoff.to_rfc3339()),
            filtered_pull_requests: filtered,
        }))
    }
}
