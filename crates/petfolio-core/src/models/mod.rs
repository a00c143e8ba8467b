//! Domain models for the petfolio system.

mod metric;
mod pet;
mod records;
mod upload;

pub use metric::*;
pub use pet::*;
pub use records::*;
pub use upload::*;
