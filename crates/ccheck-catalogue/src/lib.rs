//! # ccheck-catalogue -- Entry Metadata
//!
//! Loads metadata for the catalogue entries a pull request touches.
//!
//! - [`EntrySource`] is the seam: anything that can produce
//!   [`EntryMetadata`] for an [`EntryId`](ccheck_core::EntryId).
//!   [`LocalCatalogue`] reads the checked-out repository.
//! - [`fetch_entries`] fetches a batch concurrently, one task per entry,
//!   and returns outcomes in input order. The [`FetchPolicy`] decides
//!   whether one failure aborts the batch or is recorded next to the
//!   successes.

pub mod error;
pub mod fetch;
pub mod source;

pub use error::FetchError;
pub use fetch::{fetch_entries, FetchOutcome, FetchPolicy};
pub use source::{EntryMetadata, EntrySource, LocalCatalogue};
