//! Lab DB: students registry over MySQL with a REST surface.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod state;

pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use db::{connect, ensure_database_exists, ping, StudentsRepo, StudentsTable, Table};
pub use error::{AppError, ConfigError};
pub use model::Student;
pub use response::{success_many, success_one, success_one_ok};
pub use routes::{app_router, common_routes, common_routes_with_ready, student_routes};
pub use state::AppState;
