//! `ccheck classify`: print the change classification as JSON.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use ccheck_core::{classify, ActionList, EntryId};

use crate::load_changes;

/// Arguments for the `classify` subcommand.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// JSON file with `added_files`, `deleted_files` and `all_changed_files`.
    /// Defaults to the corresponding environment variables.
    #[arg(long)]
    pub changed_files: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// Classification as printed by `ccheck classify`.
#[derive(Debug, Serialize)]
pub struct ClassifySummary {
    pub actions: ActionList,
    pub labels: BTreeSet<&'static str>,
    pub entries_to_check: Vec<EntryId>,
    pub removed_entries: Vec<EntryId>,
}

impl ClassifySummary {
    pub fn from_actions(actions: ActionList) -> Self {
        Self {
            labels: actions.labels(),
            entries_to_check: actions.entries_to_check(),
            removed_entries: actions.removed_entries(),
            actions,
        }
    }
}

/// Execute the classify subcommand.
pub fn run_classify(args: &ClassifyArgs, repo_root: &Path) -> Result<u8> {
    let changes = load_changes(args.changed_files.as_deref(), repo_root)?;
    let summary = ClassifySummary::from_actions(classify(&changes));

    let json = if args.pretty {
        serde_json::to_string_pretty(&summary)?
    } else {
        serde_json::to_string(&summary)?
    };
    println!("{json}");
    Ok(0)
}
