//! Single-commit lookup.

use chrono::{DateTime, Utc};
use serde_json::Value;

use repolens_types::commit::CommitDetail;
use repolens_types::error::ProviderError;

use crate::provider::ProviderApi;

/// Fetch one commit and shape it for display.
///
/// The display hash is the 7-character prefix; the full hash is
/// preserved separately and is the only form used for lookups.
pub async fn fetch_commit<A: ProviderApi>(
    api: &A,
    owner: &str,
    name: &str,
    sha: &str,
) -> Result<CommitDetail, ProviderError> {
    let body = api
        .get(&format!("/repos/{owner}/{name}/commits/{sha}"), &[])
        .await?;
    shape_commit(&body)
}

fn shape_commit(body: &Value) -> Result<CommitDetail, ProviderError> {
    let full_sha = body
        .get("sha")
        .and_then(Value::as_str)
        .ok_or_else(|| ProviderError::Decode("commit body has no sha".to_string()))?;
    let commit = body
        .get("commit")
        .ok_or_else(|| ProviderError::Decode("commit body has no commit object".to_string()))?;

    let message = commit
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let author = commit
        .get("author")
        .and_then(|a| a.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();
    let committed_at: DateTime<Utc> = commit
        .get("author")
        .and_then(|a| a.get("date"))
        .and_then(Value::as_str)
        .and_then(|d| d.parse().ok())
        .ok_or_else(|| ProviderError::Decode("commit body has no author date".to_string()))?;

    Ok(CommitDetail::new(
        full_sha.to_string(),
        author,
        message,
        committed_at,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct OneCommitApi {
        body: Value,
    }

    impl ProviderApi for OneCommitApi {
        async fn get(&self, _path: &str, _query: &[(&str, &str)]) -> Result<Value, ProviderError> {
            Ok(self.body.clone())
        }

        async fn graphql(&self, _query: &str, _variables: Value) -> Result<Value, ProviderError> {
            panic!("commit lookup never issues GraphQL calls");
        }
    }

    #[tokio::test]
    async fn forty_char_hash_displays_as_first_seven() {
        let api = OneCommitApi {
            body: json!({
                "sha": "0123456789abcdef0123456789abcdef01234567",
                "commit": {
                    "message": "Tighten branch parsing",
                    "author": {"name": "Dev", "date": "2026-08-20T11:00:00Z"}
                }
            }),
        };

        let detail = fetch_commit(&api, "octo", "demo", "0123456789abcdef0123456789abcdef01234567")
            .await
            .unwrap();

        assert_eq!(detail.short_sha, "0123456");
        assert_eq!(detail.short_sha.len(), 7);
        assert_eq!(detail.sha, "0123456789abcdef0123456789abcdef01234567");
        assert_eq!(detail.author, "Dev");
    }

    #[tokio::test]
    async fn missing_sha_is_a_decode_error() {
        let api = OneCommitApi {
            body: json!({"commit": {}}),
        };
        let err = fetch_commit(&api, "octo", "demo", "abc").await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }
}
