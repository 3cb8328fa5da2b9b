//! Student records: domain types, storage, and the service enforcing write rules.

pub mod domain;
pub mod service;
pub mod store;

pub use domain::{Student, StudentId, StudentInput, StudentRecord};
pub use service::StudentService;
pub use store::{MemoryStudentStore, StudentStore};
