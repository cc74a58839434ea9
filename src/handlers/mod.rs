//! HTTP handlers for the students registry.

pub mod students;
pub use students::*;
