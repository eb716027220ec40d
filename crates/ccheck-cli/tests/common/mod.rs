//! Shared fixtures for the CLI flow tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use ccheck_catalogue::{EntryMetadata, EntrySource, FetchError, LocalCatalogue};
use ccheck_cli::config::{EventType, RunConfig};
use ccheck_core::EntryId;
use ccheck_github_client::{GithubApiError, GithubUser, IssueComment, PullRequestApi};

/// One side effect requested from GitHub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    AddLabels(u64, Vec<String>),
    RemoveLabel(u64, String),
    ListComments(u64),
    CreateComment(u64, String),
    UpdateComment(u64, String),
}

/// Records every call; serves `existing` as the PR's comments.
#[derive(Default)]
pub struct RecordingApi {
    pub existing: Vec<IssueComment>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingApi {
    pub fn with_comments(existing: Vec<IssueComment>) -> Self {
        Self {
            existing,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PullRequestApi for RecordingApi {
    async fn add_labels(&self, pr: u64, labels: &[String]) -> Result<(), GithubApiError> {
        self.push(Call::AddLabels(pr, labels.to_vec()));
        Ok(())
    }

    async fn remove_label(&self, pr: u64, label: &str) -> Result<(), GithubApiError> {
        self.push(Call::RemoveLabel(pr, label.to_string()));
        Ok(())
    }

    async fn list_comments(&self, pr: u64) -> Result<Vec<IssueComment>, GithubApiError> {
        self.push(Call::ListComments(pr));
        Ok(self.existing.clone())
    }

    async fn create_comment(&self, pr: u64, body: &str) -> Result<(), GithubApiError> {
        self.push(Call::CreateComment(pr, body.to_string()));
        Ok(())
    }

    async fn update_comment(&self, comment_id: u64, body: &str) -> Result<(), GithubApiError> {
        self.push(Call::UpdateComment(comment_id, body.to_string()));
        Ok(())
    }
}

/// Local catalogue that counts fetches.
pub struct CountingSource {
    inner: LocalCatalogue,
    pub fetches: AtomicUsize,
}

impl CountingSource {
    pub fn new(root: &Path) -> Self {
        Self {
            inner: LocalCatalogue::new(root),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntrySource for CountingSource {
    async fn fetch(&self, entry: &EntryId) -> Result<EntryMetadata, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(entry).await
    }
}

pub fn bot_comment(id: u64, body: &str) -> IssueComment {
    IssueComment {
        id,
        body: Some(body.to_string()),
        user: Some(GithubUser {
            login: "github-actions[bot]".to_string(),
        }),
        html_url: None,
    }
}

pub fn config(event: EventType, repo_root: &Path) -> RunConfig {
    RunConfig {
        event,
        merged: false,
        pr_number: Some(7),
        entry_check_limit: 1,
        comment_user: "github-actions".to_string(),
        recheck_label: "recheck".to_string(),
        repo_root: PathBuf::from(repo_root),
        dry_run: false,
    }
}

/// Write a well-formed entry below `root`.
pub fn write_entry(root: &Path, difficulty: &str, category: &str, name: &str) -> String {
    let dir = root.join(difficulty).join(format!("{category} {name}"));
    std::fs::create_dir_all(&dir).unwrap();
    let doc = serde_json::json!({
        "author": "alice",
        "challenge": {
            "difficulty": difficulty,
            "category": category,
            "name": name,
            "introduction": "An introduction."
        }
    });
    std::fs::write(dir.join("doc.json"), serde_json::to_string_pretty(&doc).unwrap()).unwrap();
    std::fs::write(dir.join("flag.txt"), "flag{test}").unwrap();
    format!("{difficulty}/{category} {name}/doc.json")
}
