//! Screen navigation.
//!
//! Back navigation is owned by the core rather than a platform history API:
//! the shell renders whatever [`NavStack::current`] says.

mod screen;
mod stack;

pub use screen::*;
pub use stack::*;
