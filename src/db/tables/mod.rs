mod students;
pub use students::*;
