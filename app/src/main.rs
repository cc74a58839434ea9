//! Entry point: bootstraps the database and serves the students registry.
//!
//! `lab-app` serves until Ctrl-C / SIGTERM. `lab-app --check` connects, pings and exits.

use lab_db::{app_router, connect, ensure_database_exists, ping, AppConfig, AppState, StudentsTable, Table};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "lab_db=info,lab_app=info";

fn default_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_LOG_FILTER)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG may come from .env, so load it before the subscriber reads the filter.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter()))
        .init();
    let config = AppConfig::from_env()?;

    let check_only = std::env::args().nth(1).as_deref() == Some("--check");

    ensure_database_exists(&config.database.url).await?;
    let pool = connect(&config.database).await?;
    ping(&pool).await?;
    if check_only {
        tracing::info!("database reachable");
        pool.close().await;
        return Ok(());
    }

    let students = StudentsTable::new(pool.clone());
    if students.create_table().await? {
        tracing::info!(table = students.table_name(), "schema initialized");
    }

    let app = app_router(AppState::new(pool.clone()), &config.server);
    let listener = TcpListener::bind(config.server.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
