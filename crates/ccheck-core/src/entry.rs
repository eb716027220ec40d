//! # Catalogue Entries
//!
//! A catalogue entry lives in a directory of the form
//! `<Difficulty>/<Category> <Name>` and is described by a `doc.json`
//! descriptor inside that directory.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::change::path_components;
use crate::error::ValidationError;

/// File name of the descriptor document inside every entry directory.
pub const DESCRIPTOR_FILE: &str = "doc.json";

/// Difficulty of a catalogue entry.
///
/// The canonical spelling is capitalized and is also the name of the
/// top-level directory holding entries of that difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    /// Introductory entries.
    Base,
    /// Regular entries.
    Normal,
    /// Advanced entries.
    Hard,
    /// Entries that fit no other difficulty.
    Other,
}

impl Difficulty {
    /// All difficulties, in display order.
    pub fn all() -> &'static [Difficulty] {
        &[Self::Base, Self::Normal, Self::Hard, Self::Other]
    }

    /// Canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
            Self::Other => "Other",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn parse_exact(value: &str) -> Option<Self> {
        Self::all().iter().copied().find(|d| d.as_str() == value)
    }

    /// Case-insensitive lookup, used to diagnose miscased values.
    pub fn parse_ignore_case(value: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|d| d.as_str().eq_ignore_ascii_case(value))
    }

    /// Comma-separated list of the canonical spellings.
    pub fn options() -> String {
        Self::all()
            .iter()
            .map(Difficulty::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_exact(s).ok_or_else(|| ValidationError::UnknownDifficulty(s.to_string()))
    }
}

/// Identifier of a catalogue entry: its directory relative to the
/// repository root.
///
/// `section` is the top-level directory (normally a difficulty) and `title`
/// the entry directory below it (normally `<Category> <Name>`). Neither part
/// is checked against the naming convention here; that is the validator's
/// job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryId {
    section: String,
    title: String,
}

impl EntryId {
    /// Build an identifier from its two directory components.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEntryPath`] if either part is empty
    /// or contains a path separator.
    pub fn new(
        section: impl Into<String>,
        title: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let section = section.into();
        let title = title.into();
        let valid = |s: &str| !s.is_empty() && !s.contains('/');
        if !valid(&section) || !valid(&title) {
            return Err(ValidationError::InvalidEntryPath(format!("{section}/{title}")));
        }
        Ok(Self { section, title })
    }

    /// Derive the entry owning a repository-relative file path.
    ///
    /// A file belongs to an entry when it sits below two directory levels:
    /// `Hard/Combat Arena/doc.json` belongs to `Hard/Combat Arena`, while
    /// `Hard/README.md` belongs to no entry.
    pub fn from_file_path(path: &str) -> Option<Self> {
        let parts = path_components(path);
        if parts.len() < 3 {
            return None;
        }
        Self::new(parts[0], parts[1]).ok()
    }

    /// Top-level directory (normally a difficulty).
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Entry directory name (normally `<Category> <Name>`).
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Repository-relative directory of the entry.
    pub fn relative_dir(&self) -> PathBuf {
        PathBuf::from(&self.section).join(&self.title)
    }

    /// Repository-relative path of the entry's descriptor.
    pub fn descriptor_path(&self) -> String {
        format!("{}/{}/{}", self.section, self.title, DESCRIPTOR_FILE)
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.section, self.title)
    }
}

impl FromStr for EntryId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = path_components(s);
        match parts.as_slice() {
            [section, title] => Self::new(*section, *title),
            _ => Err(ValidationError::InvalidEntryPath(s.to_string())),
        }
    }
}

impl TryFrom<String> for EntryId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntryId> for String {
    fn from(id: EntryId) -> Self {
        id.to_string()
    }
}
