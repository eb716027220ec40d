//! Descriptor check runs against a temporary catalogue checkout.

mod common;

use ccheck_cli::check::check_descriptors;
use ccheck_cli::config::EventType;
use ccheck_cli::report::VALIDATION_REPORT_MARKER;
use ccheck_core::ChangeSet;
use common::{bot_comment, config, write_entry, Call, RecordingApi};

const NONE: [&str; 0] = [];

#[tokio::test]
async fn valid_descriptor_passes_and_is_reported() {
    let repo = tempfile::tempdir().unwrap();
    let doc = write_entry(repo.path(), "Hard", "Combat", "Arena");
    let changes = ChangeSet::new([doc.as_str()], NONE, NONE);
    let api = RecordingApi::default();

    let outcome = check_descriptors(&config(EventType::Opened, repo.path()), &changes, &api)
        .await
        .unwrap();

    assert_eq!(outcome.exit_code(), 0);
    assert!(outcome
        .report
        .contains("### `Hard/Combat Arena`\n✅ All checks passed"));
    assert_eq!(
        api.calls(),
        vec![
            Call::ListComments(7),
            Call::CreateComment(7, outcome.report.clone()),
        ]
    );
}

#[tokio::test]
async fn mismatched_directory_fails_and_updates_previous_report() {
    let repo = tempfile::tempdir().unwrap();
    write_entry(repo.path(), "Hard", "Combat", "Arena");
    let moved = repo.path().join("Normal").join("Combat Arena");
    std::fs::create_dir_all(&moved).unwrap();
    std::fs::copy(
        repo.path().join("Hard/Combat Arena/doc.json"),
        moved.join("doc.json"),
    )
    .unwrap();

    let changes = ChangeSet::new(NONE, NONE, ["Normal/Combat Arena/doc.json"]);
    let api = RecordingApi::with_comments(vec![bot_comment(
        5,
        &format!("{VALIDATION_REPORT_MARKER}\nold"),
    )]);

    let outcome = check_descriptors(
        &config(EventType::Synchronize, repo.path()),
        &changes,
        &api,
    )
    .await
    .unwrap();

    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(outcome.failed, 1);
    assert!(outcome.report.contains("- Directory mismatch: Normal ≠ Hard"));
    assert_eq!(
        api.calls(),
        vec![
            Call::ListComments(7),
            Call::UpdateComment(5, outcome.report.clone()),
        ]
    );
}

#[tokio::test]
async fn labeled_event_reports_without_commenting() {
    let repo = tempfile::tempdir().unwrap();
    let dir = repo.path().join("Base/Misc Broken");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("doc.json"), "{ not json").unwrap();

    let changes = ChangeSet::new(NONE, NONE, ["Base/Misc Broken/doc.json"]);
    let api = RecordingApi::default();

    let outcome = check_descriptors(&config(EventType::Labeled, repo.path()), &changes, &api)
        .await
        .unwrap();

    assert_eq!(outcome.exit_code(), 1);
    assert!(outcome.report.contains("- JSON parse error:"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn no_descriptors_yields_fallback_report() {
    let repo = tempfile::tempdir().unwrap();
    let changes = ChangeSet::new(NONE, NONE, ["README.md", "Hard/Combat Arena/doc.json.bak"]);
    let api = RecordingApi::default();

    let outcome = check_descriptors(&config(EventType::Labeled, repo.path()), &changes, &api)
        .await
        .unwrap();

    assert_eq!(outcome.exit_code(), 0);
    assert!(outcome
        .report
        .ends_with("No doc.json files found in challenge directories"));
}
