//! Concurrent batch fetch of entry metadata.
//!
//! One task per entry; results are collected in input order regardless of
//! completion order. Tasks share nothing but the source.

use std::sync::Arc;

use ccheck_core::EntryId;

use crate::error::FetchError;
use crate::source::{EntryMetadata, EntrySource};

/// What to do when one entry fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Abort the batch and return the first failure, in input order.
    FailHard,
    /// Record the failure next to the other outcomes and carry on.
    #[default]
    Lenient,
}

/// One requested entry paired with its metadata or failure reason.
#[derive(Debug)]
pub struct FetchOutcome {
    pub entry: EntryId,
    pub result: Result<EntryMetadata, FetchError>,
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn metadata(&self) -> Option<&EntryMetadata> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.result.as_ref().err()
    }
}

/// Fetch metadata for every entry concurrently.
///
/// With [`FetchPolicy::Lenient`] the returned vector has one outcome per
/// input entry, in input order. With [`FetchPolicy::FailHard`] the first
/// failing entry (in input order) aborts the remaining tasks and its error
/// is returned.
pub async fn fetch_entries(
    source: Arc<dyn EntrySource>,
    entries: &[EntryId],
    policy: FetchPolicy,
) -> Result<Vec<FetchOutcome>, FetchError> {
    tracing::info!(count = entries.len(), ?policy, "fetching entry metadata");

    let mut pending = entries
        .iter()
        .cloned()
        .map(|entry| {
            let source = Arc::clone(&source);
            let task_entry = entry.clone();
            let handle = tokio::spawn(async move { source.fetch(&task_entry).await });
            (entry, handle)
        })
        .collect::<Vec<_>>()
        .into_iter();

    let mut outcomes = Vec::with_capacity(entries.len());
    while let Some((entry, handle)) = pending.next() {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(FetchError::Task {
                entry: entry.to_string(),
                reason: e.to_string(),
            }),
        };

        match (policy, result) {
            (FetchPolicy::FailHard, Err(err)) => {
                tracing::warn!(%entry, error = %err, "entry fetch failed, aborting batch");
                for (_, rest) in pending {
                    rest.abort();
                }
                return Err(err);
            }
            (_, result) => {
                if let Err(err) = &result {
                    tracing::warn!(%entry, error = %err, "entry fetch failed");
                }
                outcomes.push(FetchOutcome { entry, result });
            }
        }
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ccheck_schema::{ChallengeInfo, Descriptor};
    use std::time::Duration;

    /// Fails for entries whose title starts with "Broken"; later entries
    /// finish first.
    struct ScriptedSource;

    #[async_trait]
    impl EntrySource for ScriptedSource {
        async fn fetch(&self, entry: &EntryId) -> Result<EntryMetadata, FetchError> {
            let delay = match entry.section() {
                "Base" => 30,
                "Normal" => 15,
                _ => 1,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            if entry.title().starts_with("Broken") {
                return Err(FetchError::NotFound(entry.to_string()));
            }
            Ok(EntryMetadata {
                entry: entry.clone(),
                descriptor: Descriptor {
                    author: "tester".into(),
                    challenge: ChallengeInfo {
                        difficulty: entry.section().parse().unwrap(),
                        category: "Misc".into(),
                        name: entry.title().into(),
                        introduction: String::new(),
                    },
                },
                files: vec!["doc.json".into()],
            })
        }
    }

    fn entries(list: &[&str]) -> Vec<EntryId> {
        list.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[tokio::test]
    async fn lenient_keeps_input_order_and_failures() {
        let input = entries(&["Base/Misc One", "Normal/Broken Two", "Hard/Misc Three"]);
        let outcomes = fetch_entries(Arc::new(ScriptedSource), &input, FetchPolicy::Lenient)
            .await
            .unwrap();

        let order: Vec<_> = outcomes.iter().map(|o| o.entry.clone()).collect();
        assert_eq!(order, input);
        assert!(outcomes[0].is_ok());
        assert!(outcomes[1].error().is_some());
        assert_eq!(
            outcomes[2].metadata().unwrap().descriptor.challenge.name,
            "Misc Three"
        );
    }

    #[tokio::test]
    async fn fail_hard_returns_first_failure() {
        let input = entries(&["Base/Misc One", "Normal/Broken Two", "Hard/Broken Three"]);
        let err = fetch_entries(Arc::new(ScriptedSource), &input, FetchPolicy::FailHard)
            .await
            .unwrap_err();
        match err {
            FetchError::NotFound(entry) => assert_eq!(entry, "Normal/Broken Two"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_batch_yields_no_outcomes() {
        let outcomes = fetch_entries(Arc::new(ScriptedSource), &[], FetchPolicy::FailHard)
            .await
            .unwrap();
        assert!(outcomes.is_empty());
    }

    #[test]
    fn default_policy_is_lenient() {
        assert_eq!(FetchPolicy::default(), FetchPolicy::Lenient);
    }
}
