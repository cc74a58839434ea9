//! Load settings from the process environment (or any key lookup, for tests).

use crate::config::types::*;
use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

impl AppConfig {
    /// Read settings from the environment. A `.env` file in the working directory is
    /// honored if present; variables already set in the environment win.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::info!(path = %path.display(), "loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from a key lookup. Unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        if !url.starts_with("mysql://") && !url.starts_with("mariadb://") {
            return Err(ConfigError::Invalid {
                key: "DATABASE_URL",
                value: url,
            });
        }

        let max_connections: u32 = parse_or(&lookup, "DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }
        let acquire_secs: u64 = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_ACQUIRE_TIMEOUT_SECS)?;

        let bind_addr = match lookup("BIND_ADDR") {
            Some(v) => SocketAddr::from_str(v.trim()).map_err(|_| ConfigError::Invalid {
                key: "BIND_ADDR",
                value: v,
            })?,
            None => SocketAddr::from_str(DEFAULT_BIND_ADDR).map_err(|_| ConfigError::Invalid {
                key: "BIND_ADDR",
                value: DEFAULT_BIND_ADDR.into(),
            })?,
        };
        let body_limit_bytes: usize = parse_or(&lookup, "BODY_LIMIT_BYTES", DEFAULT_BODY_LIMIT_BYTES)?;

        Ok(AppConfig {
            database: DatabaseConfig {
                url,
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_secs),
            },
            server: ServerConfig {
                bind_addr,
                body_limit_bytes,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid { key, value: v }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.database.url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.database.acquire_timeout, Duration::from_secs(30));
        assert_eq!(cfg.server.bind_addr.port(), 3000);
        assert_eq!(cfg.server.body_limit_bytes, 65536);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = load(&[
            ("DATABASE_URL", "mysql://lab:secret@db:3307/school"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("DB_ACQUIRE_TIMEOUT_SECS", " 3 "),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("BODY_LIMIT_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(cfg.database.url, "mysql://lab:secret@db:3307/school");
        assert_eq!(cfg.database.max_connections, 12);
        assert_eq!(cfg.database.acquire_timeout, Duration::from_secs(3));
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(cfg.server.body_limit_bytes, 1024);
    }

    #[test]
    fn rejects_non_mysql_url() {
        let err = load(&[("DATABASE_URL", "postgres://localhost/lab")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_URL", .. }));
    }

    #[test]
    fn rejects_zero_connections() {
        let err = load(&[("DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DB_MAX_CONNECTIONS", .. }));
    }

    #[test]
    fn rejects_garbage_numbers_and_addresses() {
        assert!(matches!(
            load(&[("DB_ACQUIRE_TIMEOUT_SECS", "soon")]).unwrap_err(),
            ConfigError::Invalid { key: "DB_ACQUIRE_TIMEOUT_SECS", .. }
        ));
        assert!(matches!(
            load(&[("BIND_ADDR", "localhost")]).unwrap_err(),
            ConfigError::Invalid { key: "BIND_ADDR", .. }
        ));
    }
}
