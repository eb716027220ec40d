//! Typed form of a `doc.json` descriptor.

use ccheck_core::Difficulty;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors loading a typed descriptor.
#[derive(Error, Debug)]
pub enum DescriptorError {
    /// The descriptor is not valid JSON of the expected shape.
    #[error("invalid descriptor: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Entry descriptor (`doc.json`).
///
/// Unknown fields are accepted; the catalogue adds optional metadata over
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Entry author.
    pub author: String,
    /// Challenge metadata.
    pub challenge: ChallengeInfo,
}

/// The `challenge` section of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeInfo {
    /// Difficulty, canonical spelling only.
    pub difficulty: Difficulty,
    /// Category, also the first word of the entry directory.
    pub category: String,
    /// Display name.
    pub name: String,
    /// Short introduction shown in the catalogue.
    pub introduction: String,
}

impl Descriptor {
    /// Parse a descriptor from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self, DescriptorError> {
        Ok(serde_json::from_str(content)?)
    }
}
