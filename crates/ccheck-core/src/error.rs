//! # Error Hierarchy
//!
//! Structured error types shared by the workspace, built with `thiserror`.
//!
//! Descriptor content problems are not errors at this level: the validator
//! reports them as human-readable strings. The types here cover malformed
//! input to the tooling itself (bad change lists, invalid identifiers).

use thiserror::Error;

/// Errors while loading the changed-file lists produced by CI.
#[derive(Error, Debug)]
pub enum ChangeSetError {
    /// The change file could not be read.
    #[error("failed to read change list {path}: {source}")]
    Read {
        /// Path of the file that failed to load.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The change list was not valid JSON of the expected shape.
    #[error("invalid change list in {origin}: {source}")]
    InvalidJson {
        /// Where the list came from (file path or variable name).
        origin: String,
        /// Underlying parse error.
        source: serde_json::Error,
    },
}

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Entry path does not have the `<section>/<title>` shape.
    #[error("invalid entry path: \"{0}\" (expected <Difficulty>/<Category> <Name>)")]
    InvalidEntryPath(String),

    /// Difficulty is not one of the enumerated values.
    #[error("unknown difficulty: \"{0}\" (expected one of Base, Normal, Hard, Other)")]
    UnknownDifficulty(String),
}
