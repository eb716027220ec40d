//! # ccheck-schema -- Descriptor Validation
//!
//! Every catalogue entry carries a `doc.json` descriptor:
//!
//! ```json
//! {
//!   "author": "someone",
//!   "challenge": {
//!     "difficulty": "Hard",
//!     "category": "Combat",
//!     "name": "Arena",
//!     "introduction": "..."
//!   }
//! }
//! ```
//!
//! ## Responsibilities
//!
//! - **Validation:** check a descriptor against the required shape and
//!   against the directory it lives in, producing human-readable errors
//!   ([`validate`]).
//! - **Typed access:** deserialize a descriptor that is known to be well
//!   formed into [`Descriptor`] ([`descriptor`]).
//!
//! Validation works on the untyped JSON value so that every problem in a
//! document is reported at once instead of stopping at the first serde
//! error.

pub mod descriptor;
pub mod validate;

// Re-export primary types.
pub use descriptor::{ChallengeInfo, Descriptor, DescriptorError};
pub use validate::{
    select_descriptor_files, validate_changed_descriptors, validate_descriptor,
    validate_descriptor_bytes, validate_descriptor_file, validate_descriptor_str,
    ValidationResult,
};
