//! Shared application state for all routes.

use crate::db::{StudentsRepo, StudentsTable};
use sqlx::MySqlPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: MySqlPool,
    pub students: Arc<dyn StudentsRepo>,
}

impl AppState {
    pub fn new(pool: MySqlPool) -> Self {
        let students = Arc::new(StudentsTable::new(pool.clone()));
        Self::with_students(pool, students)
    }

    /// State over a caller-supplied student store; the pool still backs readiness.
    pub fn with_students(pool: MySqlPool, students: Arc<dyn StudentsRepo>) -> Self {
        AppState { pool, students }
    }
}
