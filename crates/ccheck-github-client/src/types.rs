//! Response shapes for the subset of the GitHub REST API the checks use.
//!
//! Only the fields the checks read are modeled; GitHub returns many more
//! and unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Account that authored a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubUser {
    pub login: String,
}

/// Issue (or pull request) comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub user: Option<GithubUser>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl IssueComment {
    /// Comment body, empty when GitHub omitted it.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    /// Login of the author, if present.
    pub fn author(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }

    /// True when `login` wrote this comment.
    ///
    /// App accounts appear as `name[bot]`; either spelling matches.
    pub fn is_authored_by(&self, login: &str) -> bool {
        match self.author() {
            Some(author) => {
                author == login
                    || author
                        .strip_suffix("[bot]")
                        .is_some_and(|stem| stem == login)
            }
            None => false,
        }
    }
}

/// Issue label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}
