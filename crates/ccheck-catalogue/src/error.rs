//! Entry fetch error types.

use ccheck_schema::DescriptorError;

/// Errors fetching metadata for one entry.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The entry directory does not exist.
    #[error("entry directory {0} not found")]
    NotFound(String),
    /// A file of the entry could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    /// The descriptor is not a well-formed `doc.json`.
    #[error("invalid descriptor for {entry}: {source}")]
    Descriptor {
        entry: String,
        source: DescriptorError,
    },
    /// The fetch task panicked or was cancelled.
    #[error("fetch task for {entry} failed: {reason}")]
    Task { entry: String, reason: String },
}
