//! Entry metadata sources.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ccheck_core::{EntryId, DESCRIPTOR_FILE};
use ccheck_schema::Descriptor;
use serde::Serialize;

use crate::error::FetchError;

/// Metadata of one catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryMetadata {
    pub entry: EntryId,
    pub descriptor: Descriptor,
    /// Names directly inside the entry directory, sorted; directories carry
    /// a trailing `/`.
    pub files: Vec<String>,
}

/// Anything that can produce metadata for an entry.
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Fetch metadata for one entry.
    async fn fetch(&self, entry: &EntryId) -> Result<EntryMetadata, FetchError>;
}

/// Reads entries from a checked-out catalogue repository.
#[derive(Debug, Clone)]
pub struct LocalCatalogue {
    root: PathBuf,
}

impl LocalCatalogue {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl EntrySource for LocalCatalogue {
    async fn fetch(&self, entry: &EntryId) -> Result<EntryMetadata, FetchError> {
        let dir = self.root.join(entry.relative_dir());
        let is_dir = tokio::fs::metadata(&dir)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            return Err(FetchError::NotFound(entry.to_string()));
        }

        let descriptor_path = dir.join(DESCRIPTOR_FILE);
        let content = tokio::fs::read_to_string(&descriptor_path)
            .await
            .map_err(|source| FetchError::Read {
                path: descriptor_path.display().to_string(),
                source,
            })?;
        let descriptor =
            Descriptor::from_json_str(&content).map_err(|source| FetchError::Descriptor {
                entry: entry.to_string(),
                source,
            })?;

        let files = list_dir(&dir).await?;
        tracing::debug!(%entry, files = files.len(), "loaded entry metadata");

        Ok(EntryMetadata {
            entry: entry.clone(),
            descriptor,
            files,
        })
    }
}

async fn list_dir(dir: &Path) -> Result<Vec<String>, FetchError> {
    let read_err = |source| FetchError::Read {
        path: dir.display().to_string(),
        source,
    };
    let mut reader = tokio::fs::read_dir(dir).await.map_err(read_err)?;
    let mut names = Vec::new();
    while let Some(item) = reader.next_entry().await.map_err(read_err)? {
        let mut name = item.file_name().to_string_lossy().into_owned();
        if item.file_type().await.map(|t| t.is_dir()).unwrap_or(false) {
            name.push('/');
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}
