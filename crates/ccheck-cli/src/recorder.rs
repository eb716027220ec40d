//! Run-level bookkeeping: when the run started, what it ran, what failed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ccheck_catalogue::FetchOutcome;

/// A failure that makes the run exit non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunFailure {
    /// What was being done, e.g. an entry id or "entry check limit".
    pub context: String,
    pub message: String,
}

/// End-of-run summary, logged once the run is over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: DateTime<Utc>,
    pub commands: Vec<String>,
    pub failure_count: usize,
}

/// Accumulates run state for the final exit code and summary log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunRecorder {
    started_at: Option<DateTime<Utc>>,
    commands: Vec<String>,
    failures: Vec<RunFailure>,
}

impl RunRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp the start time. Later calls keep the first stamp.
    pub fn record_script_start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Utc::now());
        }
    }

    pub fn record_command(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }

    pub fn record_failure(&mut self, context: impl Into<String>, message: impl Into<String>) {
        let failure = RunFailure {
            context: context.into(),
            message: message.into(),
        };
        tracing::warn!(context = %failure.context, "{}", failure.message);
        self.failures.push(failure);
    }

    /// Record one failure per failed fetch outcome.
    pub fn record_fetch_outcomes(&mut self, outcomes: &[FetchOutcome]) {
        for outcome in outcomes {
            if let Some(err) = outcome.error() {
                self.record_failure(outcome.entry.to_string(), err.to_string());
            }
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn failures(&self) -> &[RunFailure] {
        &self.failures
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// 1 when anything failed, else 0.
    pub fn exit_code(&self) -> u8 {
        u8::from(self.has_failures())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            started_at: self.started_at,
            finished_at: Utc::now(),
            commands: self.commands.clone(),
            failure_count: self.failures.len(),
        }
    }

    /// Log the summary at info level and return it.
    pub fn log_summary(&self) -> RunSummary {
        let summary = self.summary();
        let started_at = summary
            .started_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        tracing::info!(
            started_at = %started_at,
            finished_at = %summary.finished_at.to_rfc3339(),
            commands = %summary.commands.join(","),
            failures = summary.failure_count,
            "run summary"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccheck_catalogue::FetchError;
    use ccheck_core::EntryId;

    #[test]
    fn empty_recorder_exits_zero() {
        let recorder = RunRecorder::new();
        assert!(!recorder.has_failures());
        assert_eq!(recorder.exit_code(), 0);
        assert!(recorder.started_at().is_none());
    }

    #[test]
    fn start_time_is_stamped_once() {
        let mut recorder = RunRecorder::new();
        recorder.record_script_start();
        let first = recorder.started_at();
        recorder.record_script_start();
        assert!(first.is_some());
        assert_eq!(recorder.started_at(), first);
    }

    #[test]
    fn failures_set_exit_code() {
        let mut recorder = RunRecorder::new();
        recorder.record_command("pr");
        recorder.record_failure("entry check limit", "too many entries");
        assert_eq!(recorder.commands(), ["pr".to_string()]);
        assert_eq!(recorder.failures()[0].context, "entry check limit");
        assert_eq!(recorder.exit_code(), 1);
    }

    #[test]
    fn summary_reports_start_commands_and_failures() {
        let mut recorder = RunRecorder::new();
        recorder.record_script_start();
        recorder.record_command("pr");
        recorder.record_failure("Hard/Combat Arena", "missing");

        let summary = recorder.log_summary();
        assert_eq!(summary.started_at, recorder.started_at());
        assert!(summary.started_at.unwrap() <= summary.finished_at);
        assert_eq!(summary.commands, vec!["pr".to_string()]);
        assert_eq!(summary.failure_count, 1);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["commands"], serde_json::json!(["pr"]));
        assert_eq!(json["failure_count"], 1);
    }

    #[test]
    fn summary_of_untouched_run_has_no_start() {
        let summary = RunRecorder::new().summary();
        assert!(summary.started_at.is_none());
        assert!(summary.commands.is_empty());
        assert_eq!(summary.failure_count, 0);
    }

    #[test]
    fn only_failed_outcomes_are_recorded() {
        let entry: EntryId = "Hard/Combat Arena".parse().unwrap();
        let outcomes = vec![FetchOutcome {
            entry: entry.clone(),
            result: Err(FetchError::NotFound(entry.to_string())),
        }];
        let mut recorder = RunRecorder::new();
        recorder.record_fetch_outcomes(&outcomes);
        assert_eq!(recorder.failures().len(), 1);
        assert_eq!(recorder.failures()[0].context, "Hard/Combat Arena");
    }
}
