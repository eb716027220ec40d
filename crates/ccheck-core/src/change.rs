//! # Change Sets
//!
//! The three lists of changed files a CI diff action produces for a pull
//! request: added, deleted, and all changed (added, copied, modified,
//! renamed, deleted).
//!
//! Lists are accepted either as a JSON array of strings or as one path per
//! line. Entry directories contain spaces, so whitespace is never a
//! separator.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChangeSetError;

/// Environment variable holding the added-file list.
pub const ADDED_FILES_VAR: &str = "ADDED_FILES";
/// Environment variable holding the deleted-file list.
pub const DELETED_FILES_VAR: &str = "DELETED_FILES";
/// Environment variable holding the all-changed-file list.
pub const ALL_CHANGED_FILES_VAR: &str = "ALL_CHANGED_FILES";

/// Immutable set of changed file paths for one run.
///
/// Every added or deleted path is also a member of the all-changed set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    #[serde(rename = "added_files")]
    added: BTreeSet<String>,
    #[serde(rename = "deleted_files")]
    deleted: BTreeSet<String>,
    #[serde(rename = "all_changed_files")]
    all: BTreeSet<String>,
}

/// On-disk shape of a change file.
#[derive(Debug, Default, Deserialize)]
struct RawChangeSet {
    #[serde(default)]
    added_files: Vec<String>,
    #[serde(default)]
    deleted_files: Vec<String>,
    #[serde(default)]
    all_changed_files: Vec<String>,
}

impl ChangeSet {
    /// Build a change set, normalizing every path.
    pub fn new<A, D, C>(added: A, deleted: D, all: C) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let added = normalized(added);
        let deleted = normalized(deleted);
        let mut all = normalized(all);
        all.extend(added.iter().cloned());
        all.extend(deleted.iter().cloned());

        Self {
            added,
            deleted,
            all,
        }
    }

    /// Parse a JSON change document:
    /// `{"added_files": [...], "deleted_files": [...], "all_changed_files": [...]}`.
    ///
    /// Missing keys are treated as empty lists.
    pub fn from_json_str(content: &str, origin: &str) -> Result<Self, ChangeSetError> {
        let raw: RawChangeSet =
            serde_json::from_str(content).map_err(|source| ChangeSetError::InvalidJson {
                origin: origin.to_string(),
                source,
            })?;
        Ok(Self::new(
            raw.added_files,
            raw.deleted_files,
            raw.all_changed_files,
        ))
    }

    /// Load a JSON change document from disk.
    pub fn from_json_file(path: &Path) -> Result<Self, ChangeSetError> {
        let content = std::fs::read_to_string(path).map_err(|source| ChangeSetError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content, &path.display().to_string())
    }

    /// Load the three lists from `ADDED_FILES`, `DELETED_FILES` and
    /// `ALL_CHANGED_FILES`. Unset variables are empty lists.
    pub fn from_env() -> Result<Self, ChangeSetError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load the three lists through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ChangeSetError> {
        let read = |var: &str| -> Result<Vec<String>, ChangeSetError> {
            match lookup(var) {
                Some(raw) => parse_path_list(&raw, var),
                None => Ok(Vec::new()),
            }
        };
        Ok(Self::new(
            read(ADDED_FILES_VAR)?,
            read(DELETED_FILES_VAR)?,
            read(ALL_CHANGED_FILES_VAR)?,
        ))
    }

    /// Whether the path was added in this change.
    pub fn is_added(&self, path: &str) -> bool {
        self.added.contains(path)
    }

    /// Whether the path was deleted in this change.
    pub fn is_deleted(&self, path: &str) -> bool {
        self.deleted.contains(path)
    }

    /// All changed paths, sorted.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.all.iter().map(String::as_str)
    }

    /// Added paths, sorted.
    pub fn added(&self) -> impl Iterator<Item = &str> {
        self.added.iter().map(String::as_str)
    }

    /// Deleted paths, sorted.
    pub fn deleted(&self) -> impl Iterator<Item = &str> {
        self.deleted.iter().map(String::as_str)
    }

    /// Number of changed paths.
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

fn normalized<I>(items: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items
        .into_iter()
        .filter_map(|p| normalize_path(p.as_ref()))
        .collect()
}

/// Parse one list of paths: a JSON array of strings, or one path per line.
pub fn parse_path_list(raw: &str, origin: &str) -> Result<Vec<String>, ChangeSetError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        let items: Vec<String> =
            serde_json::from_str(trimmed).map_err(|source| ChangeSetError::InvalidJson {
                origin: origin.to_string(),
                source,
            })?;
        return Ok(items.iter().filter_map(|p| normalize_path(p)).collect());
    }
    Ok(trimmed.lines().filter_map(normalize_path).collect())
}

/// Normalize a repository-relative path: trim surrounding whitespace and
/// line endings, drop a leading `./`, convert `\` separators. Returns `None`
/// for blank input.
pub fn normalize_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.replace('\\', "/"))
}

/// Split a repository-relative path into its non-empty components.
pub fn path_components(path: &str) -> Vec<&str> {
    path.split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_merges_added_and_deleted_into_all() {
        let set = ChangeSet::new(["a/b/doc.json"], ["c/d/doc.json"], ["e.txt"]);
        let all: Vec<_> = set.all().collect();
        assert_eq!(all, vec!["a/b/doc.json", "c/d/doc.json", "e.txt"]);
        assert!(set.is_added("a/b/doc.json"));
        assert!(set.is_deleted("c/d/doc.json"));
        assert!(!set.is_added("e.txt"));
    }

    #[test]
    fn parse_path_list_accepts_json_array_with_spaces() {
        let list = parse_path_list(r#"["Hard/Combat Arena/doc.json", "scripts/x.py"]"#, "T")
            .unwrap();
        assert_eq!(list, vec!["Hard/Combat Arena/doc.json", "scripts/x.py"]);
    }

    #[test]
    fn parse_path_list_accepts_lines() {
        let list = parse_path_list("Hard/Combat Arena/doc.json\n\n./README.md\r\n", "T").unwrap();
        assert_eq!(list, vec!["Hard/Combat Arena/doc.json", "README.md"]);
    }

    #[test]
    fn parse_path_list_rejects_broken_json() {
        let err = parse_path_list("[\"a\", ", "ADDED_FILES").unwrap_err();
        assert!(err.to_string().contains("ADDED_FILES"));
    }

    #[test]
    fn from_lookup_treats_missing_vars_as_empty() {
        let set = ChangeSet::from_lookup(|var| {
            (var == ALL_CHANGED_FILES_VAR).then(|| "Base/Crypto Intro/doc.json".to_string())
        })
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.added().count(), 0);
    }

    #[test]
    fn from_json_str_defaults_missing_keys() {
        let set = ChangeSet::from_json_str(r#"{"added_files": ["Hard/X Y/doc.json"]}"#, "t")
            .unwrap();
        assert!(set.is_added("Hard/X Y/doc.json"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn from_json_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ChangeSet::from_json_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ChangeSetError::Read { .. }));
    }

    #[test]
    fn from_json_file_round_trips_serialized_set() {
        let dir = tempfile::tempdir().unwrap();
        let set = ChangeSet::new(["Hard/A B/doc.json"], Vec::<String>::new(), ["scripts/a.py"]);
        let path = dir.path().join("changes.json");
        std::fs::write(&path, serde_json::to_string(&set).unwrap()).unwrap();
        assert_eq!(ChangeSet::from_json_file(&path).unwrap(), set);
    }

    #[test]
    fn path_components_skip_empty_and_dot() {
        assert_eq!(path_components("./Hard//X Y/doc.json"), vec!["Hard", "X Y", "doc.json"]);
        assert!(path_components("").is_empty());
    }
}
