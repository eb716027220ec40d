//! Run configuration.
//!
//! Built once at start-up from the workflow environment; command-line flags
//! are applied on top. Nothing downstream reads the environment again.

use std::path::PathBuf;
use std::str::FromStr;

/// Login the workflow token comments as.
pub const DEFAULT_COMMENT_USER: &str = "github-actions";

/// Label a maintainer applies to re-run the checks without the entry limit.
pub const RECHECK_LABEL: &str = "recheck";

/// Entries checked per run unless overridden.
pub const DEFAULT_ENTRY_CHECK_LIMIT: usize = 1;

/// Pull-request event that triggered the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EventType {
    Opened,
    Synchronize,
    Labeled,
    Closed,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Synchronize => "synchronize",
            Self::Labeled => "labeled",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "opened" => Ok(Self::Opened),
            "synchronize" => Ok(Self::Synchronize),
            "labeled" => Ok(Self::Labeled),
            "closed" => Ok(Self::Closed),
            other => Err(ConfigError::UnknownEvent(other.to_string())),
        }
    }
}

/// Everything a check run needs to know about its surroundings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub event: EventType,
    /// Set on `closed` events when the PR was merged.
    pub merged: bool,
    pub pr_number: Option<u64>,
    /// Entries checked per run; 0 means no limit.
    pub entry_check_limit: usize,
    /// Account whose comments are the bot's own.
    pub comment_user: String,
    pub recheck_label: String,
    pub repo_root: PathBuf,
    /// Print side effects instead of calling GitHub.
    pub dry_run: bool,
}

impl RunConfig {
    /// Load from the process environment.
    ///
    /// Variables:
    /// - `EVENT_TYPE` (required: opened, synchronize, labeled, closed)
    /// - `IS_MERGED` (`true` when merged)
    /// - `PR_NUMBER`
    /// - `ENTRY_CHECK_LIMIT` (default: 1)
    pub fn from_env(repo_root: PathBuf) -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok(), repo_root)
    }

    /// Load through an arbitrary variable lookup.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        repo_root: PathBuf,
    ) -> Result<Self, ConfigError> {
        let event = lookup("EVENT_TYPE")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingEvent)?
            .parse()?;

        let merged = lookup("IS_MERGED").is_some_and(|v| v.trim() == "true");

        let pr_number = match lookup("PR_NUMBER").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "PR_NUMBER",
                value: raw.clone(),
            })?),
            None => None,
        };

        let entry_check_limit = match lookup("ENTRY_CHECK_LIMIT").filter(|v| !v.trim().is_empty())
        {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "ENTRY_CHECK_LIMIT",
                value: raw.clone(),
            })?,
            None => DEFAULT_ENTRY_CHECK_LIMIT,
        };

        Ok(Self {
            event,
            merged,
            pr_number,
            entry_check_limit,
            comment_user: DEFAULT_COMMENT_USER.to_string(),
            recheck_label: RECHECK_LABEL.to_string(),
            repo_root,
            dry_run: false,
        })
    }

    /// Number of the pull request, required before any GitHub side effect.
    /// Dry runs without one address PR 0.
    pub fn require_pr_number(&self) -> Result<u64, ConfigError> {
        match (self.pr_number, self.dry_run) {
            (Some(pr), _) => Ok(pr),
            (None, true) => Ok(0),
            (None, false) => Err(ConfigError::MissingPrNumber),
        }
    }

    /// Limit in force for this run: a recheck (labeled event) lifts it.
    pub fn effective_limit(&self) -> usize {
        match self.event {
            EventType::Labeled => 0,
            _ => self.entry_check_limit,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("EVENT_TYPE environment variable is required")]
    MissingEvent,
    #[error("unknown event type \"{0}\" (expected opened, synchronize, labeled or closed)")]
    UnknownEvent(String),
    #[error("PR_NUMBER environment variable is required to update the pull request")]
    MissingPrNumber,
    #[error("invalid value for {var}: \"{value}\"")]
    InvalidValue { var: &'static str, value: String },
}
