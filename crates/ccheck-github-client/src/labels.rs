//! Pull-request labels.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/repos/{owner}/{repo}/issues/{number}/labels` | Add labels |
//! | DELETE | `/repos/{owner}/{repo}/issues/{number}/labels/{name}` | Remove one label |

use serde::Serialize;

use crate::error::GithubApiError;
use crate::types::Label;
use crate::{ensure_success, RepoRoute};

#[derive(Debug, Serialize)]
struct AddLabelsRequest<'a> {
    labels: &'a [String],
}

/// Client for issue/PR labels.
#[derive(Debug, Clone)]
pub(crate) struct LabelClient {
    http: reqwest::Client,
    route: RepoRoute,
}

impl LabelClient {
    pub(crate) fn new(http: reqwest::Client, route: RepoRoute) -> Self {
        Self { http, route }
    }

    /// Add labels to a pull request and return the resulting label set.
    ///
    /// An empty list sends nothing.
    pub(crate) async fn add(
        &self,
        pr: u64,
        labels: &[String],
    ) -> Result<Vec<Label>, GithubApiError> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }
        let endpoint = format!("POST /issues/{pr}/labels");
        let url = self.route.url(&["issues", &pr.to_string(), "labels"])?;
        let body = AddLabelsRequest { labels };

        let resp = crate::retry::retry_send(|| self.http.post(url.clone()).json(&body).send())
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

    /// Remove one label from a pull request.
    ///
    /// A label that is not on the PR (404) counts as removed.
    pub(crate) async fn remove(&self, pr: u64, label: &str) -> Result<(), GithubApiError> {
        let endpoint = format!("DELETE /issues/{pr}/labels/{label}");
        let url = self
            .route
            .url(&["issues", &pr.to_string(), "labels", label])?;

        let resp = crate::retry::retry_send(|| self.http.delete(url.clone()).send())
            .await
            .map_err(|e| GithubApiError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(pr, label, "label not present");
            return Ok(());
        }
        ensure_success(resp, &endpoint).await?;
        Ok(())
    }
}
