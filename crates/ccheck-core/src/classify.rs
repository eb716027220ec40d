//! # Change Classification
//!
//! Turns a [`ChangeSet`] into an [`ActionList`] in two explicit passes:
//!
//! 1. Descriptor files (`<section>/<title>/doc.json`) are classified as
//!    added, removed, or modified by membership in the added / deleted sets.
//! 2. Every other path is classified next. Files inside an entry directory
//!    mark the entry modified unless pass 1 already classified it, so an
//!    explicit add or remove is never shadowed by the modified fallback.
//!    Paths under the scripts directory or the workflow directory produce
//!    repository-wide actions. Only paths whose top directory is a
//!    difficulty belong to an entry; anything else (`.github/ISSUE_TEMPLATE`,
//!    `docs/images`) is ignored.
//!
//! Within a pass paths are visited in sorted order, so classification is a
//! pure function of the change set.

use crate::action::{Action, ActionList, Tag};
use crate::change::{path_components, ChangeSet};
use crate::entry::{Difficulty, EntryId, DESCRIPTOR_FILE};

/// Directory conventions the classifier relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// File name of entry descriptors.
    pub descriptor_file: String,
    /// Top-level directory holding repository scripts.
    pub scripts_dir: String,
    /// Directory holding CI workflows, relative to the repository root.
    pub workflow_dir: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            descriptor_file: DESCRIPTOR_FILE.to_string(),
            scripts_dir: "scripts".to_string(),
            workflow_dir: ".github/workflows".to_string(),
        }
    }
}

/// What a single changed path refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PathKind {
    Scripts,
    Workflow,
    Descriptor(EntryId),
    EntryFile(EntryId),
    Other,
}

/// Classifies changed paths into tagged actions.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a classifier with the given conventions.
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Conventions in use.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify every path of the change set.
    pub fn classify(&self, changes: &ChangeSet) -> ActionList {
        let mut actions = ActionList::new();

        // Pass 1: descriptor files decide add / remove / modify.
        for path in changes.all() {
            if let PathKind::Descriptor(entry) = self.kind(path) {
                let tag = if changes.is_added(path) {
                    Tag::EntryAdded
                } else if changes.is_deleted(path) {
                    Tag::EntryRemoved
                } else {
                    Tag::EntryModified
                };
                actions.add(Action::entry(tag, entry));
            }
        }

        // Pass 2: everything else.
        for path in changes.all() {
            match self.kind(path) {
                PathKind::Descriptor(_) => {}
                PathKind::EntryFile(entry) => {
                    if !actions.contains_entry(&entry) {
                        actions.add(Action::entry(Tag::EntryModified, entry));
                    }
                }
                PathKind::Scripts => {
                    actions.add(Action::repo(Tag::ScriptsChanged));
                }
                PathKind::Workflow => {
                    actions.add(Action::repo(Tag::WorkflowChanged));
                }
                PathKind::Other => {
                    tracing::trace!(path, "path not relevant to classification");
                }
            }
        }

        actions
    }

    fn kind(&self, path: &str) -> PathKind {
        let parts = path_components(path);
        let Some(first) = parts.first() else {
            return PathKind::Other;
        };

        if *first == self.config.scripts_dir {
            return PathKind::Scripts;
        }

        let workflow = path_components(&self.config.workflow_dir);
        if parts.len() > workflow.len() && parts[..workflow.len()] == workflow[..] {
            return PathKind::Workflow;
        }

        if Difficulty::parse_exact(first).is_none() {
            return PathKind::Other;
        }

        match EntryId::from_file_path(path) {
            Some(entry) if parts.last() == Some(&self.config.descriptor_file.as_str()) => {
                PathKind::Descriptor(entry)
            }
            Some(entry) => PathKind::EntryFile(entry),
            None => PathKind::Other,
        }
    }
}

/// Classify with the default conventions.
pub fn classify(changes: &ChangeSet) -> ActionList {
    Classifier::default().classify(changes)
}
