//! Derived display fields.
//!
//! Nothing computed here is stored as a source of truth: age labels and
//! status flags are recomputed from dates and records whenever the
//! controller refreshes them.

mod age;
mod species;
mod status;

pub use age::*;
pub use species::*;
pub use status::*;
