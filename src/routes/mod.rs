//! Router assembly.

mod common;
mod students;

pub use common::{common_routes, common_routes_with_ready};
pub use students::student_routes;

use crate::config::ServerConfig;
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: common routes at the root, students under `/api/v1`.
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(common_routes_with_ready(state.clone()))
        .nest("/api/v1", student_routes(state))
        .layer(RequestBodyLimitLayer::new(server.body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}
