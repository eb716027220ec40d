//! Issue comments on pull requests.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/repos/{owner}/{repo}/issues/{number}/comments` | List (paginated) |
//! | POST   | `/repos/{owner}/{repo}/issues/{number}/comments` | Create |
//! | PATCH  | `/repos/{owner}/{repo}/issues/comments/{id}` | Edit |

use serde::Serialize;

use crate::error::GithubApiError;
use crate::types::IssueComment;
use crate::{ensure_success, RepoRoute};

/// Largest page GitHub serves for comment listings.
const PAGE_SIZE: usize = 100;

#[derive(Debug, Serialize)]
struct CommentBody<'a> {
    body: &'a str,
}

/// Client for issue comments.
#[derive(Debug, Clone)]
pub(crate) struct CommentClient {
    http: reqwest::Client,
    route: RepoRoute,
}

impl CommentClient {
    pub(crate) fn new(http: reqwest::Client, route: RepoRoute) -> Self {
        Self { http, route }
    }

    /// List every comment on a pull request, oldest first.
    ///
    /// Follows pages of [`PAGE_SIZE`] until a short page comes back.
    pub(crate) async fn list(&self, pr: u64) -> Result<Vec<IssueComment>, GithubApiError> {
        let endpoint = format!("GET /issues/{pr}/comments");
        let mut url = self.route.url(&["issues", &pr.to_string(), "comments"])?;
        let mut comments = Vec::new();

        for page in 1u32.. {
            url.query_pairs_mut()
                .clear()
                .append_pair("per_page", &PAGE_SIZE.to_string())
                .append_pair("page", &page.to_string());

            let resp = crate::retry::retry_send(|| self.http.get(url.clone()).send())
                .await
                .map_err(|e| GithubApiError::Http {
                    endpoint: endpoint.clone(),
                    source: e,
                })?;
            let resp = ensure_success(resp, &endpoint).await?;
            let batch: Vec<IssueComment> =
                resp.json()
                    .await
                    .map_err(|e| GithubApiError::Deserialization {
                        endpoint: endpoint.clone(),
                        source: e,
                    })?;

            let done = batch.len() < PAGE_SIZE;
            comments.extend(batch);
            if done {
                break;
            }
        }

        tracing::debug!(pr, count = comments.len(), "listed comments");
        Ok(comments)
    }

    /// Post a new comment.
    pub(crate) async fn create(
        &self,
        pr: u64,
        body: &str,
    ) -> Result<IssueComment, GithubApiError> {
        let endpoint = format!("POST /issues/{pr}/comments");
        let url = self.route.url(&["issues", &pr.to_string(), "comments"])?;
        let payload = CommentBody { body };

        let resp = crate::retry::retry_send(|| self.http.post(url.clone()).json(&payload).send())
            .await
            .map_err(|e| GithubApiError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;
        let resp = ensure_success(resp, &endpoint).await?;

        resp.json().await.map_err(|e| GithubApiError::Deserialization {
            endpoint,
            source: e,
        })
    }

    /// Replace the body of an existing comment.
    pub(crate) async fn update(
        &self,
        comment_id: u64,
        body: &str,
    ) -> Result<IssueComment, GithubApiError> {
        let endpoint = format!("PATCH /issues/comments/{comment_id}");
        let url = self
            .route
            .url(&["issues", "comments", &comment_id.to_string()])?;
        let payload = CommentBody { body };

        let resp =
            crate::retry::retry_send(|| self.http.patch(url.clone()).json(&payload).send())
                .await
                .map_err(|e| GithubApiError::Http {
                    endpoint: endpoint.clone(),
                    source: e,
                })?;
        let resp = ensure_success(resp, &endpoint).await?;

        resp.json().await.map_err(|e| GithubApiError::Deserialization {
            endpoint,
            source: e,
        })
    }
}
