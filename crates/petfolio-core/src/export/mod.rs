//! Export of a pet's health record.

mod health_record;

pub use health_record::*;
