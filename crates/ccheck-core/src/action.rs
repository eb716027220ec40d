//! # Tagged Actions
//!
//! The classifier turns a change set into [`Action`]s: a [`Tag`] plus an
//! optional [`EntryId`] subject. An [`ActionList`] keeps them in insertion
//! order without duplicates and derives the pull-request labels from the
//! tags it holds.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entry::EntryId;

/// Kind of change detected in a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tag {
    /// A new entry descriptor was added.
    EntryAdded,
    /// An entry descriptor was deleted.
    EntryRemoved,
    /// An existing entry changed.
    EntryModified,
    /// Something under the scripts directory changed.
    ScriptsChanged,
    /// A CI workflow changed.
    WorkflowChanged,
}

impl Tag {
    /// All tags, in declaration order.
    pub fn all() -> &'static [Tag] {
        &[
            Self::EntryAdded,
            Self::EntryRemoved,
            Self::EntryModified,
            Self::ScriptsChanged,
            Self::WorkflowChanged,
        ]
    }

    /// Stable machine name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EntryAdded => "entry-added",
            Self::EntryRemoved => "entry-removed",
            Self::EntryModified => "entry-modified",
            Self::ScriptsChanged => "scripts-changed",
            Self::WorkflowChanged => "workflow-changed",
        }
    }

    /// Pull-request label applied for this tag.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EntryAdded => "challenge: add",
            Self::EntryRemoved => "challenge: remove",
            Self::EntryModified => "challenge: modify",
            Self::ScriptsChanged => "scripts",
            Self::WorkflowChanged => "workflow",
        }
    }

    /// Whether actions with this tag carry an entry subject.
    pub fn is_entry(&self) -> bool {
        matches!(
            self,
            Self::EntryAdded | Self::EntryRemoved | Self::EntryModified
        )
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified change: tag plus optional entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// What happened.
    pub tag: Tag,
    /// The entry it happened to, for entry tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<EntryId>,
}

impl Action {
    /// An action on a catalogue entry.
    pub fn entry(tag: Tag, entry: EntryId) -> Self {
        Self {
            tag,
            subject: Some(entry),
        }
    }

    /// A repository-wide action with no entry subject.
    pub fn repo(tag: Tag) -> Self {
        Self { tag, subject: None }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subject {
            Some(entry) => write!(f, "{}({})", self.tag, entry),
            None => write!(f, "{}", self.tag),
        }
    }
}

/// Ordered, deduplicated list of actions for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActionList {
    actions: Vec<Action>,
}

impl ActionList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an action unless an identical one is already present.
    /// Returns whether the action was inserted.
    pub fn add(&mut self, action: Action) -> bool {
        if self.actions.contains(&action) {
            return false;
        }
        self.actions.push(action);
        true
    }

    /// Iterate actions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// Actions as a slice.
    pub fn as_slice(&self) -> &[Action] {
        &self.actions
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Distinct tags present.
    pub fn tags(&self) -> BTreeSet<Tag> {
        self.actions.iter().map(|a| a.tag).collect()
    }

    /// Whether any action carries the tag.
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.actions.iter().any(|a| a.tag == tag)
    }

    /// Labels derived from the tags, sorted.
    pub fn labels(&self) -> BTreeSet<&'static str> {
        self.actions.iter().map(|a| a.tag.label()).collect()
    }

    /// Whether any action refers to the entry.
    pub fn contains_entry(&self, entry: &EntryId) -> bool {
        self.actions
            .iter()
            .any(|a| a.subject.as_ref() == Some(entry))
    }

    /// Every entry touched, in first-seen order.
    pub fn entries(&self) -> Vec<&EntryId> {
        let mut seen = Vec::new();
        for entry in self.actions.iter().filter_map(|a| a.subject.as_ref()) {
            if !seen.contains(&entry) {
                seen.push(entry);
            }
        }
        seen
    }

    /// Entries whose descriptor was deleted.
    pub fn removed_entries(&self) -> Vec<EntryId> {
        self.entries_where(|tag| tag == Tag::EntryRemoved)
    }

    /// Entries that were added or modified and not removed: the entries
    /// whose content should be checked.
    pub fn entries_to_check(&self) -> Vec<EntryId> {
        let removed = self.removed_entries();
        self.entries_where(|tag| matches!(tag, Tag::EntryAdded | Tag::EntryModified))
            .into_iter()
            .filter(|entry| !removed.contains(entry))
            .collect()
    }

    fn entries_where(&self, pred: impl Fn(Tag) -> bool) -> Vec<EntryId> {
        let mut out: Vec<EntryId> = Vec::new();
        for action in self.actions.iter().filter(|a| pred(a.tag)) {
            if let Some(entry) = &action.subject {
                if !out.contains(entry) {
                    out.push(entry.clone());
                }
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a ActionList {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}
