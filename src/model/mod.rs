//! Domain records persisted by the table layer.

mod student;
pub use student::*;
