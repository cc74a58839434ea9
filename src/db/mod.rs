//! Connection management: database bootstrap, pool lifecycle and error classification.

pub mod table;
pub mod tables;

pub use table::Table;
pub use tables::{StudentsRepo, StudentsTable};

use crate::config::DatabaseConfig;
use crate::error::{AppError, ConfigError};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use sqlx::{ConnectOptions, Connection, MySqlConnection, MySqlPool};
use std::str::FromStr;

/// SQLSTATE raised by CREATE TABLE when the table is already there.
pub(crate) const SQLSTATE_TABLE_EXISTS: &str = "42S01";
/// SQLSTATE raised by DROP TABLE when the table is unknown.
pub(crate) const SQLSTATE_UNKNOWN_TABLE: &str = "42S02";

/// Split a connection URL into a server URL (no database selected, query string kept)
/// and the decoded database name from the path, if any.
pub fn split_database_url(url: &str) -> Result<(String, Option<String>), ConfigError> {
    let invalid = || ConfigError::Invalid {
        key: "DATABASE_URL",
        value: url.to_string(),
    };
    let scheme_end = url.find("://").ok_or_else(invalid)? + 3;
    let rest = url.get(scheme_end..).unwrap_or("");
    let (location, query) = match rest.split_once('?') {
        Some((l, q)) => (l, Some(q)),
        None => (rest, None),
    };
    let (authority, db_name) = match location.split_once('/') {
        Some((a, d)) => (a, d.trim()),
        None => (location, ""),
    };
    if authority.is_empty() || db_name.contains('/') {
        return Err(invalid());
    }
    let mut server_url = format!("{}{}/", &url[..scheme_end], authority);
    if let Some(q) = query.filter(|q| !q.is_empty()) {
        server_url.push('?');
        server_url.push_str(q);
    }
    if db_name.is_empty() {
        return Ok((server_url, None));
    }
    // Same percent-decoding the pool applies when it selects the database.
    let opts = MySqlConnectOptions::from_str(url).map_err(|_| invalid())?;
    Ok((server_url, opts.get_database().map(str::to_string)))
}

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Ensure the database named in `database_url` exists; create it if not. Connects to the
/// server without selecting a database. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (server_url, db_name) = split_database_url(database_url)?;
    let Some(db_name) = db_name else {
        return Ok(());
    };
    let opts = MySqlConnectOptions::from_str(&server_url).map_err(|_| ConfigError::Invalid {
        key: "DATABASE_URL",
        value: database_url.to_string(),
    })?;
    let mut conn: MySqlConnection = opts.connect().await?;
    let created = sqlx::query(&format!(
        "CREATE DATABASE IF NOT EXISTS {}",
        quote_ident(&db_name)
    ))
    .execute(&mut conn)
    .await?
    .rows_affected();
    if created > 0 {
        tracing::info!(database = %db_name, "created database");
    }
    conn.close().await?;
    Ok(())
}

/// Open the shared pool.
pub async fn connect(config: &DatabaseConfig) -> Result<MySqlPool, AppError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await?;
    tracing::info!(max_connections = config.max_connections, "database pool ready");
    Ok(pool)
}

/// Round-trip a trivial statement to prove the pool can serve queries.
pub async fn ping(pool: &MySqlPool) -> Result<(), AppError> {
    sqlx::query("SELECT 1").fetch_optional(pool).await?;
    Ok(())
}

/// SQLSTATE of a server-side error, if the error came from the server.
pub(crate) fn sql_state(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
