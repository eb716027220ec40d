//! End-to-end runs of the pull-request check against a temporary catalogue
//! checkout and a recording GitHub stand-in.

mod common;

use std::sync::Arc;

use ccheck_cli::config::EventType;
use ccheck_cli::messages::{MSG_CHECKLIST, MSG_HEADER, MSG_MERGED};
use ccheck_cli::pr::check_pull_request;
use ccheck_cli::report::PR_REPORT_MARKER;
use ccheck_core::ChangeSet;
use common::{bot_comment, config, write_entry, Call, CountingSource, RecordingApi};

const NONE: [&str; 0] = [];

#[tokio::test]
async fn opened_with_new_entry_labels_greets_and_reports() {
    let repo = tempfile::tempdir().unwrap();
    let doc = write_entry(repo.path(), "Hard", "Combat", "Arena");
    let changes = ChangeSet::new(
        [doc.as_str(), "Hard/Combat Arena/flag.txt"],
        NONE,
        NONE,
    );
    let api = RecordingApi::default();
    let source = Arc::new(CountingSource::new(repo.path()));

    let outcome = check_pull_request(
        &config(EventType::Opened, repo.path()),
        &changes,
        &api,
        source.clone(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(source.count(), 1);

    let report = outcome.report.clone().unwrap();
    assert!(report.starts_with(PR_REPORT_MARKER));
    assert!(report.contains("### `Hard/Combat Arena`"));
    assert!(report.contains("| Author | alice |"));
    assert!(report.contains("| Files | `doc.json`, `flag.txt` |"));

    let greeting = format!("{MSG_HEADER}{MSG_CHECKLIST}");
    assert_eq!(
        api.calls(),
        vec![
            Call::AddLabels(7, vec!["challenge: add".to_string()]),
            Call::CreateComment(7, greeting),
            Call::ListComments(7),
            Call::CreateComment(7, report),
        ]
    );
}

#[tokio::test]
async fn over_limit_skips_fetch_records_failure_and_still_reports() {
    let repo = tempfile::tempdir().unwrap();
    let first = write_entry(repo.path(), "Hard", "Combat", "Arena");
    let second = write_entry(repo.path(), "Base", "Misc", "Maze");
    let changes = ChangeSet::new(NONE, NONE, [first.as_str(), second.as_str()]);
    let api = RecordingApi::default();
    let source = Arc::new(CountingSource::new(repo.path()));

    let outcome = check_pull_request(
        &config(EventType::Synchronize, repo.path()),
        &changes,
        &api,
        source.clone(),
    )
    .await
    .unwrap();

    assert_eq!(source.count(), 0, "no metadata fetched past the limit");
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(outcome.recorder.failures()[0].context, "entry check limit");
    let summary = outcome.recorder.summary();
    assert!(summary.started_at.is_some());
    assert_eq!(summary.commands, vec!["pr".to_string()]);
    assert_eq!(summary.failure_count, 1);

    let report = outcome.report.clone().unwrap();
    assert!(report.contains("touches 2 challenges, more than the 1 checked per run"));
    assert_eq!(
        api.calls(),
        vec![Call::ListComments(7), Call::CreateComment(7, report)]
    );
}

#[tokio::test]
async fn labeled_lifts_limit_and_removes_recheck() {
    let repo = tempfile::tempdir().unwrap();
    let first = write_entry(repo.path(), "Hard", "Combat", "Arena");
    let second = write_entry(repo.path(), "Base", "Misc", "Maze");
    let changes = ChangeSet::new(NONE, NONE, [first.as_str(), second.as_str()]);
    let api = RecordingApi::with_comments(vec![bot_comment(
        99,
        &format!("{PR_REPORT_MARKER}\nold report"),
    )]);
    let source = Arc::new(CountingSource::new(repo.path()));

    let outcome = check_pull_request(
        &config(EventType::Labeled, repo.path()),
        &changes,
        &api,
        source.clone(),
    )
    .await
    .unwrap();

    assert_eq!(source.count(), 2);
    assert_eq!(outcome.exit_code(), 0);

    let report = outcome.report.clone().unwrap();
    assert_eq!(
        api.calls(),
        vec![
            Call::RemoveLabel(7, "recheck".to_string()),
            Call::ListComments(7),
            Call::UpdateComment(99, report),
        ]
    );
}

#[tokio::test]
async fn missing_entry_directory_is_a_recorded_failure() {
    let repo = tempfile::tempdir().unwrap();
    let changes = ChangeSet::new(NONE, NONE, ["Hard/Combat Ghost/notes.md"]);
    let api = RecordingApi::default();
    let source = Arc::new(CountingSource::new(repo.path()));

    let outcome = check_pull_request(
        &config(EventType::Synchronize, repo.path()),
        &changes,
        &api,
        source,
    )
    .await
    .unwrap();

    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(outcome.recorder.failures()[0].context, "Hard/Combat Ghost");
    assert!(outcome
        .report
        .unwrap()
        .contains("❌ Failed to load challenge"));
}

#[tokio::test]
async fn removed_entry_is_listed_without_fetching() {
    let repo = tempfile::tempdir().unwrap();
    let changes = ChangeSet::new(NONE, ["Normal/Puzzle Old/doc.json"], NONE);
    let api = RecordingApi::default();
    let source = Arc::new(CountingSource::new(repo.path()));

    let outcome = check_pull_request(
        &config(EventType::Opened, repo.path()),
        &changes,
        &api,
        source.clone(),
    )
    .await
    .unwrap();

    assert_eq!(source.count(), 0);
    assert_eq!(outcome.exit_code(), 0);
    assert!(outcome.recorder.started_at().is_none());
    assert!(outcome
        .report
        .unwrap()
        .contains("### Removed challenges\n- `Normal/Puzzle Old`"));
    assert_eq!(
        api.calls()[0],
        Call::AddLabels(7, vec!["challenge: remove".to_string()])
    );
}

#[tokio::test]
async fn scripts_only_change_has_no_report() {
    let repo = tempfile::tempdir().unwrap();
    let changes = ChangeSet::new(NONE, NONE, ["scripts/build.py", ".github/workflows/ci.yml"]);
    let api = RecordingApi::default();
    let source = Arc::new(CountingSource::new(repo.path()));

    let outcome = check_pull_request(
        &config(EventType::Opened, repo.path()),
        &changes,
        &api,
        source,
    )
    .await
    .unwrap();

    assert!(outcome.report.is_none());
    assert_eq!(
        api.calls(),
        vec![
            Call::AddLabels(7, vec!["scripts".to_string(), "workflow".to_string()]),
            Call::CreateComment(7, MSG_HEADER.to_string()),
        ]
    );
}

#[tokio::test]
async fn issue_template_change_fetches_nothing() {
    let repo = tempfile::tempdir().unwrap();
    let changes = ChangeSet::new(NONE, NONE, [".github/ISSUE_TEMPLATE/bug.md"]);
    let api = RecordingApi::default();
    let source = Arc::new(CountingSource::new(repo.path()));

    let outcome = check_pull_request(
        &config(EventType::Opened, repo.path()),
        &changes,
        &api,
        source.clone(),
    )
    .await
    .unwrap();

    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(source.count(), 0);
    assert!(outcome.report.is_none());
    assert_eq!(
        api.calls(),
        vec![
            Call::AddLabels(7, Vec::new()),
            Call::CreateComment(7, MSG_HEADER.to_string()),
        ]
    );
}

#[tokio::test]
async fn closed_and_merged_posts_merge_message_only() {
    let repo = tempfile::tempdir().unwrap();
    let doc = write_entry(repo.path(), "Hard", "Combat", "Arena");
    let changes = ChangeSet::new([doc.as_str()], NONE, NONE);
    let api = RecordingApi::default();
    let source = Arc::new(CountingSource::new(repo.path()));

    let mut cfg = config(EventType::Closed, repo.path());
    cfg.merged = true;
    let outcome = check_pull_request(&cfg, &changes, &api, source.clone())
        .await
        .unwrap();

    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(source.count(), 0);
    assert_eq!(api.calls(), vec![Call::CreateComment(7, MSG_MERGED.to_string())]);
}

#[tokio::test]
async fn closed_without_merge_does_nothing() {
    let repo = tempfile::tempdir().unwrap();
    let api = RecordingApi::default();
    let source = Arc::new(CountingSource::new(repo.path()));

    let outcome = check_pull_request(
        &config(EventType::Closed, repo.path()),
        &ChangeSet::default(),
        &api,
        source,
    )
    .await
    .unwrap();

    assert_eq!(outcome.exit_code(), 0);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn side_effects_need_a_pr_number() {
    let repo = tempfile::tempdir().unwrap();
    let api = RecordingApi::default();
    let source = Arc::new(CountingSource::new(repo.path()));
    let mut cfg = config(EventType::Opened, repo.path());
    cfg.pr_number = None;

    let err = check_pull_request(&cfg, &ChangeSet::default(), &api, source)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("PR_NUMBER"));
}
