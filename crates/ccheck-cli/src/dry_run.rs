//! Stand-in for GitHub that prints side effects instead of performing them.

use async_trait::async_trait;
use ccheck_github_client::{GithubApiError, IssueComment, PullRequestApi};

/// Prints what would be sent; lists no existing comments.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunApi;

fn first_line(body: &str) -> &str {
    body.lines().find(|l| !l.trim().is_empty()).unwrap_or("")
}

#[async_trait]
impl PullRequestApi for DryRunApi {
    async fn add_labels(&self, pr: u64, labels: &[String]) -> Result<(), GithubApiError> {
        if !labels.is_empty() {
            println!("[dry-run] #{pr}: add labels {}", labels.join(", "));
        }
        Ok(())
    }

    async fn remove_label(&self, pr: u64, label: &str) -> Result<(), GithubApiError> {
        println!("[dry-run] #{pr}: remove label {label}");
        Ok(())
    }

    async fn list_comments(&self, _pr: u64) -> Result<Vec<IssueComment>, GithubApiError> {
        Ok(Vec::new())
    }

    async fn create_comment(&self, pr: u64, body: &str) -> Result<(), GithubApiError> {
        println!("[dry-run] #{pr}: new comment \"{}\"", first_line(body));
        Ok(())
    }

    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<(), GithubApiError> {
        println!(
            "[dry-run] comment {comment_id}: edit to \"{}\"",
            first_line(body)
        );
        Ok(())
    }
}
