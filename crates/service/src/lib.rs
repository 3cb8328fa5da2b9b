//! Service layer for the student registry.
//! - Owns the record validation and uniqueness rules.
//! - Storage sits behind the `StudentStore` trait; the default backend is in-memory.

pub mod errors;
pub mod students;
