//! # ccheck-github-client -- Typed client for the GitHub REST API
//!
//! Covers the calls the pull-request checks make:
//! - **Labels**: add a batch, remove one
//! - **Comments**: list, create, edit
//!
//! Plus [`update_or_comment`], which keeps a single bot comment per PR up
//! to date by locating it through an HTML marker embedded in its body.
//!
//! Callers depend on the [`PullRequestApi`] trait rather than on
//! [`GithubClient`] so that dry runs and tests can substitute their own
//! implementation.

mod comments;
pub mod config;
pub mod error;
mod labels;
pub(crate) mod retry;
pub mod types;

pub use config::GithubApiConfig;
pub use error::GithubApiError;
pub use types::{GithubUser, IssueComment, Label};

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

/// Media type GitHub recommends for REST v3 requests.
const ACCEPT_GITHUB_JSON: &str = "application/vnd.github+json";

/// Side effects the PR checks perform on a pull request.
#[async_trait]
pub trait PullRequestApi: Send + Sync {
    /// Add labels to the PR. An empty slice is a no-op.
    async fn add_labels(&self, pr: u64, labels: &[String]) -> Result<(), GithubApiError>;

    /// Remove a label from the PR. Absent labels are not an error.
    async fn remove_label(&self, pr: u64, label: &str) -> Result<(), GithubApiError>;

    /// All comments on the PR, oldest first.
    async fn list_comments(&self, pr: u64) -> Result<Vec<IssueComment>, GithubApiError>;

    /// Post a new comment on the PR.
    async fn create_comment(&self, pr: u64, body: &str) -> Result<(), GithubApiError>;

    /// Replace the body of an existing comment.
    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<(), GithubApiError>;
}

/// What [`update_or_comment`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentWrite {
    /// No matching comment existed; a new one was posted.
    Created,
    /// The comment with this id was edited in place.
    Updated(u64),
}

/// Edit the newest comment by `user` whose body contains `marker`, or post
/// `body` as a new comment when there is none.
///
/// `body` should itself contain `marker` so the next run finds it.
pub async fn update_or_comment(
    api: &dyn PullRequestApi,
    pr: u64,
    user: &str,
    marker: &str,
    body: &str,
) -> Result<CommentWrite, GithubApiError> {
    let comments = api.list_comments(pr).await?;
    let existing = comments
        .iter()
        .rev()
        .find(|c| c.is_authored_by(user) && c.body_text().contains(marker));

    match existing {
        Some(comment) => {
            tracing::info!(pr, comment_id = comment.id, "updating existing report comment");
            api.update_comment(comment.id, body).await?;
            Ok(CommentWrite::Updated(comment.id))
        }
        None => {
            tracing::info!(pr, "posting new report comment");
            api.create_comment(pr, body).await?;
            Ok(CommentWrite::Created)
        }
    }
}

/// Top-level GitHub client. Holds sub-clients for labels and comments.
#[derive(Debug, Clone)]
pub struct GithubClient {
    labels: labels::LabelClient,
    comments: comments::CommentClient,
}

impl GithubClient {
    /// Create a new client from configuration.
    pub fn new(config: GithubApiConfig) -> Result<Self, GithubApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_str(&format!(
                        "Bearer {}",
                        config.token.as_str()
                    ))
                    .map_err(|_| GithubApiError::Config(config::ConfigError::InvalidToken))?,
                );
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static(ACCEPT_GITHUB_JSON),
                );
                headers
            })
            .build()
            .map_err(|e| GithubApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        let (owner, name) = config.owner_and_name();
        let route = RepoRoute {
            base_url: config.api_url.clone(),
            owner: owner.to_string(),
            name: name.to_string(),
        };

        Ok(Self {
            labels: labels::LabelClient::new(http.clone(), route.clone()),
            comments: comments::CommentClient::new(http, route),
        })
    }
}

#[async_trait]
impl PullRequestApi for GithubClient {
    async fn add_labels(&self, pr: u64, labels: &[String]) -> Result<(), GithubApiError> {
        self.labels.add(pr, labels).await.map(|_| ())
    }

    async fn remove_label(&self, pr: u64, label: &str) -> Result<(), GithubApiError> {
        self.labels.remove(pr, label).await
    }

    async fn list_comments(&self, pr: u64) -> Result<Vec<IssueComment>, GithubApiError> {
        self.comments.list(pr).await
    }

    async fn create_comment(&self, pr: u64, body: &str) -> Result<(), GithubApiError> {
        self.comments.create(pr, body).await.map(|_| ())
    }

    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<(), GithubApiError> {
        self.comments.update(comment_id, body).await.map(|_| ())
    }
}

/// Base URL plus repository, producing `/repos/{owner}/{name}/...` URLs.
#[derive(Debug, Clone)]
pub(crate) struct RepoRoute {
    base_url: Url,
    owner: String,
    name: String,
}

impl RepoRoute {
    /// Append `repos/{owner}/{name}` and `tail` to the base path.
    ///
    /// Each segment is percent-encoded, so label names with spaces are safe.
    pub(crate) fn url(&self, tail: &[&str]) -> Result<Url, GithubApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GithubApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.name.as_str()])
            .extend(tail);
        Ok(url)
    }
}

/// Turn a non-2xx response into [`GithubApiError::ApiError`].
pub(crate) async fn ensure_success(
    resp: reqwest::Response,
    endpoint: &str,
) -> Result<reqwest::Response, GithubApiError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(GithubApiError::ApiError {
        endpoint: endpoint.to_string(),
        status,
        body,
    })
}
