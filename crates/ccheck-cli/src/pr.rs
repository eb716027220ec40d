//! `ccheck pr`: classify a pull request, label it, greet the contributor
//! and report on the challenges it touches.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use ccheck_catalogue::{fetch_entries, EntrySource, FetchPolicy, LocalCatalogue};
use ccheck_core::{classify, ActionList, ChangeSet};
use ccheck_github_client::{update_or_comment, PullRequestApi};

use crate::config::{EventType, RunConfig};
use crate::load_changes;
use crate::messages::MSG_MERGED;
use crate::recorder::RunRecorder;
use crate::report::{render_greeting, render_pr_report, OverLimit, PrReport, PR_REPORT_MARKER};

/// Arguments for the `pr` subcommand.
#[derive(Args, Debug)]
pub struct PrArgs {
    /// JSON file with `added_files`, `deleted_files` and `all_changed_files`.
    /// Defaults to the corresponding environment variables.
    #[arg(long)]
    pub changed_files: Option<PathBuf>,

    /// Challenges checked per run, 0 for no limit. Overrides ENTRY_CHECK_LIMIT.
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Everything a pull-request check produced.
#[derive(Debug)]
pub struct PrOutcome {
    pub actions: ActionList,
    /// Greeting for the contributor; posted on `opened`.
    pub greeting: Option<String>,
    /// Challenge check report, when any challenge was touched.
    pub report: Option<String>,
    pub recorder: RunRecorder,
}

impl PrOutcome {
    fn closed(recorder: RunRecorder) -> Self {
        Self {
            actions: ActionList::new(),
            greeting: None,
            report: None,
            recorder,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.recorder.exit_code()
    }
}

/// Execute the pr subcommand against the checked-out repository.
pub async fn run_pr(args: &PrArgs, config: &RunConfig, api: &dyn PullRequestApi) -> Result<u8> {
    let mut config = config.clone();
    if let Some(limit) = args.limit {
        config.entry_check_limit = limit;
    }

    let changes = load_changes(args.changed_files.as_deref(), &config.repo_root)?;
    let source: Arc<dyn EntrySource> = Arc::new(LocalCatalogue::new(config.repo_root.clone()));
    let outcome = check_pull_request(&config, &changes, api, source).await?;

    if let Some(report) = &outcome.report {
        println!("{report}");
    }
    let summary = outcome.recorder.log_summary();
    if summary.failure_count > 0 {
        tracing::error!(failures = summary.failure_count, "challenge check reported failures");
    }
    Ok(outcome.exit_code())
}

/// Run the pull-request check for one event.
///
/// On `closed` only the merge message is posted. Otherwise the changes are
/// classified and, when challenges were touched, their metadata is fetched
/// (unless more are touched than the limit allows) and rendered into the
/// report. `opened` adds labels and the greeting, `labeled` clears the
/// recheck label, and any report updates the bot's report comment.
pub async fn check_pull_request(
    config: &RunConfig,
    changes: &ChangeSet,
    api: &dyn PullRequestApi,
    source: Arc<dyn EntrySource>,
) -> Result<PrOutcome> {
    let mut recorder = RunRecorder::new();

    if config.event == EventType::Closed {
        if config.merged {
            let pr = config.require_pr_number()?;
            api.create_comment(pr, MSG_MERGED)
                .await
                .context("posting merged message")?;
        }
        return Ok(PrOutcome::closed(recorder));
    }

    let limit = config.effective_limit();
    tracing::info!(event = %config.event, limit, "running challenge check");
    tracing::info!(count = changes.len(), "changes found");

    let actions = classify(changes);
    tracing::info!(
        "identified actions: {}",
        actions.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    );
    tracing::info!(
        "identified labels: {}",
        actions.labels().into_iter().collect::<Vec<_>>().join(", ")
    );

    let greeting = render_greeting(&actions);
    let mut report = None;

    if actions.entries().is_empty() {
        tracing::info!("no challenges to report, skipping");
    } else {
        let to_check = actions.entries_to_check();
        let removed = actions.removed_entries();
        let mut outcomes = Vec::new();
        let mut over_limit = None;

        if !to_check.is_empty() {
            tracing::info!(
                "checking challenges: {}",
                to_check.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
            );
            recorder.record_script_start();
            recorder.record_command("pr");

            let count = to_check.len();
            if limit > 0 && count > limit {
                tracing::warn!(count, limit, "too many challenges to check, skipping");
                over_limit = Some(OverLimit { count, limit });
                recorder.record_failure(
                    "entry check limit",
                    format!("{count} challenges to check, more than the limit of {limit}"),
                );
            } else {
                outcomes = fetch_entries(source, &to_check, FetchPolicy::Lenient).await?;
                recorder.record_fetch_outcomes(&outcomes);
            }
        }

        report = Some(render_pr_report(&PrReport {
            outcomes: &outcomes,
            removed: &removed,
            over_limit,
            recheck_label: &config.recheck_label,
        }));
    }

    match config.event {
        EventType::Opened => {
            let pr = config.require_pr_number()?;
            let labels: Vec<String> = actions.labels().into_iter().map(String::from).collect();
            api.add_labels(pr, &labels)
                .await
                .context("adding labels")?;
            api.create_comment(pr, &greeting)
                .await
                .context("posting greeting")?;
        }
        EventType::Labeled => {
            let pr = config.require_pr_number()?;
            api.remove_label(pr, &config.recheck_label)
                .await
                .context("removing recheck label")?;
        }
        EventType::Synchronize | EventType::Closed => {}
    }

    if let Some(report) = &report {
        let pr = config.require_pr_number()?;
        update_or_comment(api, pr, &config.comment_user, PR_REPORT_MARKER, report)
            .await
            .context("posting challenge check report")?;
    }

    Ok(PrOutcome {
        actions,
        greeting: Some(greeting),
        report,
        recorder,
    })
}
