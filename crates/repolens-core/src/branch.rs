//! Branch comparison against the repository's default branch.
//!
//! Two operations share a fetch of the repository info (for
//! `default_branch`): the per-branch ahead/behind diff built from REST
//! comparison calls, and the one-query GraphQL branch summary.
//!
//! Comparison calls fan out with bounded concurrency. `buffered`
//! yields results in input order, so the shaped output stays in
//! branch-list order without re-sorting. The first failing leg aborts
//! the whole operation; partial results are never shown.

use chrono::{DateTime, Utc};
use futures_util::{StreamExt, TryStreamExt, stream};
use serde::Deserialize;
use serde_json::{Value, json};

use repolens_types::branch::{
    Branch, BranchDiff, BranchDiffReport, BranchSummary, DiffCommit, RawBranchData, short_sha,
};
use repolens_types::error::ProviderError;

use crate::provider::ProviderApi;

/// Upper bound on concurrent comparison calls.
const MAX_COMPARISONS_IN_FLIGHT: usize = 4;

/// Branch refs fetched by the summary query (single page).
const BRANCH_REF_PAGE: u32 = 100;

const BRANCH_SUMMARY_QUERY: &str = r#"
query BranchSummary($owner: String!, $name: String!, $default: String!, $refCount: Int!) {
  repository(owner: $owner, name: $name) {
    refs(refPrefix: "refs/heads/", first: $refCount) {
      nodes {
        name
        target {
          ... on Commit {
            committedDate
          }
        }
        compare(headRef: $default) {
          aheadBy
          commits(first: 1) {
            nodes {
              committedDate
            }
          }
        }
      }
    }
  }
}
"#;

/// Both raw comparison bodies for one branch, in call order
/// (`default...branch` then `branch...default`).
struct BranchComparison {
    branch: String,
    ahead: Value,
    behind: Value,
}

#[derive(Debug, Deserialize)]
struct SummaryData {
    repository: Option<SummaryRepository>,
}

#[derive(Debug, Deserialize)]
struct SummaryRepository {
    refs: RefList,
}

#[derive(Debug, Deserialize)]
struct RefList {
    nodes: Vec<RefNode>,
}

#[derive(Debug, Deserialize)]
struct RefNode {
    name: String,
    target: Option<RefTarget>,
    compare: Option<RefCompare>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefTarget {
    committed_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefCompare {
    ahead_by: u64,
    commits: RefCompareCommits,
}

#[derive(Debug, Deserialize)]
struct RefCompareCommits {
    nodes: Vec<RefCompareCommit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefCompareCommit {
    committed_date: DateTime<Utc>,
}

/// Compares every branch of a repository against its default branch.
pub struct BranchService<A> {
    api: A,
}

impl<A: ProviderApi> BranchService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Shaped ahead/behind diff for every branch, in branch-list order.
    pub async fn branch_diffs(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<BranchDiffReport, ProviderError> {
        let (repository_info, _, comparisons) = self.fetch_comparisons(owner, name).await?;
        let default_branch = default_branch_of(&repository_info)?;

        let diffs = comparisons
            .into_iter()
            .map(|c| BranchDiff {
                branch: c.branch,
                ahead: shape_commits(&c.ahead),
                behind: shape_commits(&c.behind),
            })
            .collect();

        Ok(BranchDiffReport {
            default_branch,
            diffs,
        })
    }

    /// Raw mode: every unprocessed REST body from a diff run, for
    /// debugging and inspection. Bypasses all shaping.
    pub async fn branch_diffs_raw(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<RawBranchData, ProviderError> {
        let (repository_info, branches_list, comparisons) =
            self.fetch_comparisons(owner, name).await?;

        let mut bodies = Vec::with_capacity(comparisons.len() * 2);
        for c in comparisons {
            bodies.push(c.ahead);
            bodies.push(c.behind);
        }

        Ok(RawBranchData {
            repository_info,
            branches_list,
            comparisons: bodies,
        })
    }

    /// One-query summary: each branch's latest change and the
    /// timestamp of its first divergence from the default branch.
    pub async fn branch_summary(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<BranchSummary, ProviderError> {
        let repository_info = self.api.get(&format!("/repos/{owner}/{name}"), &[]).await?;
        let default_branch = default_branch_of(&repository_info)?;

        let variables = json!({
            "owner": owner,
            "name": name,
            "default": default_branch,
            "refCount": BRANCH_REF_PAGE,
        });
        let body = self.api.graphql(BRANCH_SUMMARY_QUERY, variables).await?;

        // Unlike the activity view there is no meaningful partial
        // payload here, so provider-side errors abort.
        if let Some(errors) = body.get("errors").filter(|e| !e.is_null()) {
            return Err(ProviderError::Graphql(errors.to_string()));
        }

        let data: SummaryData =
            serde_json::from_value(body.get("data").cloned().unwrap_or(Value::Null))
                .map_err(|e| ProviderError::Decode(e.to_string()))?;
        let repository = data.repository.ok_or_else(|| {
            ProviderError::Decode("response body has no repository object".to_string())
        })?;

        let branches = repository
            .refs
            .nodes
            .into_iter()
            .filter_map(summarize_ref)
            .collect();

        Ok(BranchSummary {
            default_branch,
            branches,
        })
    }

    /// Fetch repository info, the branch list, and both comparison
    /// legs for every branch (including the default branch itself).
    async fn fetch_comparisons(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<(Value, Value, Vec<BranchComparison>), ProviderError> {
        let repository_info = self.api.get(&format!("/repos/{owner}/{name}"), &[]).await?;
        let default_branch = default_branch_of(&repository_info)?;

        let branches_list = self
            .api
            .get(&format!("/repos/{owner}/{name}/branches"), &[])
            .await?;
        let branch_names: Vec<String> = branches_list
            .as_array()
            .map(|arr| {
                arr.iter()
                    .filter_map(|b| b.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        tracing::debug!(
            %owner,
            %name,
            branches = branch_names.len(),
            "comparing branches against {default_branch}"
        );

        let comparisons = stream::iter(branch_names.into_iter().map(|branch| {
            let default_branch = default_branch.clone();
            async move {
                let ahead = self
                    .compare(owner, name, &default_branch, &branch)
                    .await?;
                let behind = self
                    .compare(owner, name, &branch, &default_branch)
                    .await?;
                Ok::<_, ProviderError>(BranchComparison {
                    branch,
                    ahead,
                    behind,
                })
            }
        }))
        .buffered(MAX_COMPARISONS_IN_FLIGHT)
        .try_collect::<Vec<_>>()
        .await?;

        Ok((repository_info, branches_list, comparisons))
    }

    async fn compare(
        &self,
        owner: &str,
        name: &str,
        base: &str,
        head: &str,
    ) -> Result<Value, ProviderError> {
        self.api
            .get(&format!("/repos/{owner}/{name}/compare/{base}...{head}"), &[])
            .await
    }
}

fn default_branch_of(repository_info: &Value) -> Result<String, ProviderError> {
    repository_info
        .get("default_branch")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ProviderError::Decode("repository info has no default_branch".to_string()))
}

/// Shape the `commits` array of a REST comparison body.
fn shape_commits(compare_body: &Value) -> Vec<DiffCommit> {
    compare_body
        .get("commits")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(shape_commit).collect())
        .unwrap_or_default()
}

fn shape_commit(entry: &Value) -> Option<DiffCommit> {
    let sha = entry.get("sha")?.as_str()?.to_string();
    let commit = entry.get("commit")?;
    let message = commit
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .lines()
        .next()
        .unwrap_or_default()
        .to_string();
    let author = commit
        .get("author")
        .and_then(|a| a.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    Some(DiffCommit {
        short_sha: short_sha(&sha),
        sha,
        message,
        author,
    })
}

/// A ref whose target is not a commit (e.g. a tag object) carries no
/// usable timestamp and is skipped.
fn summarize_ref(node: RefNode) -> Option<Branch> {
    let latest_change = node.target.and_then(|t| t.committed_date)?;
    let first_change = node
        .compare
        .filter(|c| c.ahead_by > 0)
        .and_then(|c| c.commits.nodes.into_iter().next())
        .map(|c| c.committed_date)
        .unwrap_or(latest_change);

    Some(Branch {
        name: node.name,
        latest_change,
        first_change,
    })
}
