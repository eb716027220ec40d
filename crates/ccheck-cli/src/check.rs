//! `ccheck check`: validate changed descriptors and post the report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ccheck_core::ChangeSet;
use ccheck_github_client::{update_or_comment, PullRequestApi};
use ccheck_schema::validate_changed_descriptors;

use crate::config::{EventType, RunConfig};
use crate::load_changes;
use crate::report::{render_validation_report, VALIDATION_REPORT_MARKER};

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON file with `added_files`, `deleted_files` and `all_changed_files`.
    /// Defaults to the corresponding environment variables.
    #[arg(long)]
    pub changed_files: Option<PathBuf>,
}

/// Result of a descriptor check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub report: String,
    /// Number of descriptors with at least one error.
    pub failed: usize,
}

impl CheckOutcome {
    pub fn exit_code(&self) -> u8 {
        u8::from(self.failed > 0)
    }
}

/// Execute the check subcommand.
pub async fn run_check(
    args: &CheckArgs,
    config: &RunConfig,
    api: &dyn PullRequestApi,
) -> Result<u8> {
    let changes = load_changes(args.changed_files.as_deref(), &config.repo_root)?;
    let outcome = check_descriptors(config, &changes, api).await?;
    println!("{}", outcome.report);
    Ok(outcome.exit_code())
}

/// Validate every changed descriptor, render the report, and on
/// `opened`/`synchronize` keep the bot's validation comment up to date.
pub async fn check_descriptors(
    config: &RunConfig,
    changes: &ChangeSet,
    api: &dyn PullRequestApi,
) -> Result<CheckOutcome> {
    tracing::info!(event = %config.event, changes = changes.len(), "checking descriptors");

    let results = validate_changed_descriptors(&config.repo_root, changes);
    let report = render_validation_report(&results);

    if matches!(config.event, EventType::Opened | EventType::Synchronize) {
        let pr = config.require_pr_number()?;
        update_or_comment(
            api,
            pr,
            &config.comment_user,
            VALIDATION_REPORT_MARKER,
            &report,
        )
        .await
        .context("posting validation report")?;
    }

    let failed = results.values().filter(|r| !r.valid).count();
    if failed > 0 {
        tracing::error!(failed, "validation failed");
    } else {
        tracing::info!(checked = results.len(), "validation passed");
    }

    Ok(CheckOutcome { report, failed })
}
