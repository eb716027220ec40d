#![deny(missing_docs)]

//! # ccheck-core -- Foundational Types for Catalogue PR Checks
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies.
//!
//! ## Design Principles
//!
//! 1. **Entries are identified by their directory.** An [`EntryId`] is the
//!    `<Difficulty>/<Category> <Name>` pair of path components; it is the
//!    only way to refer to a catalogue entry across crates.
//!
//! 2. **Single [`Difficulty`] enum.** The set of valid difficulties lives in
//!    one place, with its canonical (capitalized) spelling.
//!
//! 3. **Changes are immutable input.** A [`ChangeSet`] is built once from the
//!    CI diff and never mutated; the [`classify`] module turns it into an
//!    ordered, deduplicated [`ActionList`].
//!
//! 4. **Typed errors.** [`ChangeSetError`] and [`ValidationError`] are built
//!    with `thiserror`, no `.unwrap()` outside tests.

pub mod action;
pub mod change;
pub mod classify;
pub mod entry;
pub mod error;

// Re-export primary types at crate root for ergonomic imports.
pub use action::{Action, ActionList, Tag};
pub use change::{normalize_path, path_components, ChangeSet};
pub use classify::{classify, Classifier, ClassifierConfig};
pub use entry::{Difficulty, EntryId, DESCRIPTOR_FILE};
pub use error::{ChangeSetError, ValidationError};
