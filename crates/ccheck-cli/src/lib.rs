//! # ccheck-cli -- Pull-Request Checks for the Challenge Catalogue
//!
//! Provides the `ccheck` command-line interface run by the catalogue's CI
//! workflows.
//!
//! ## Subcommands
//!
//! - `ccheck check` -- Validate changed `doc.json` descriptors and post the
//!   validation report.
//! - `ccheck pr` -- Classify the changes, label the pull request, greet the
//!   contributor and post the challenge check report.
//! - `ccheck classify` -- Print the classification as JSON, no side effects.
//!
//! The workflow passes its context through the environment:
//!
//! ```bash
//! EVENT_TYPE=opened PR_NUMBER=12 ALL_CHANGED_FILES="$files" ccheck pr
//! ccheck --dry-run --event synchronize check --changed-files changes.json
//! ```

pub mod check;
pub mod classify;
pub mod config;
pub mod dry_run;
pub mod messages;
pub mod pr;
pub mod recorder;
pub mod report;

use std::path::{Path, PathBuf};

use anyhow::Context;
use ccheck_core::ChangeSet;

/// Resolve a path that may be relative to the repository root.
///
/// Absolute paths are returned as-is. A relative path that exists below
/// `repo_root` resolves there; otherwise it stays relative to the current
/// directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}

/// Load the change set from a JSON file if given, else from the
/// `ADDED_FILES` / `DELETED_FILES` / `ALL_CHANGED_FILES` variables.
pub fn load_changes(changed_files: Option<&Path>, repo_root: &Path) -> anyhow::Result<ChangeSet> {
    let changes = match changed_files {
        Some(path) => {
            let path = resolve_path(path, repo_root);
            ChangeSet::from_json_file(&path)
                .with_context(|| format!("loading changed files from {}", path.display()))?
        }
        None => ChangeSet::from_env().context("loading changed files from the environment")?,
    };
    tracing::debug!(
        all = changes.len(),
        added = changes.added().count(),
        deleted = changes.deleted().count(),
        "loaded change set"
    );
    Ok(changes)
}
