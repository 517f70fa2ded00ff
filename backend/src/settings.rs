//! Application configuration loaded via OrthoConfig.
//!
//! Values come from `TODOS_*` environment variables, configuration files and
//! command-line flags, layered by `ortho_config`. Unset optional fields fall
//! back to the defaults exposed by the accessors below.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use mockable::Env;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_MAX_SIZE, DEFAULT_MIN_IDLE, PoolConfig,
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
/// Fallback variable consulted when `TODOS_DATABASE_URL` is unset.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Errors raised while resolving settings into runtime values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Neither `TODOS_DATABASE_URL` nor `DATABASE_URL` was provided.
    #[error("database URL is not configured; set TODOS_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,
    /// The configured host is not an IP address.
    #[error("invalid bind host '{host}': {message}")]
    InvalidHost { host: String, message: String },
}

/// Service configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TODOS")]
pub struct AppSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Interface the HTTP server binds to.
    pub host: Option<String>,
    /// Port the HTTP server binds to.
    pub port: Option<u16>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept warm in the pool.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub connection_timeout_secs: Option<u64>,
    /// Apply embedded migrations at start-up.
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Resolve the database URL, consulting `DATABASE_URL` as a fallback.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when neither source is
    /// set to a non-blank value.
    pub fn database_url<E: Env>(&self, env: &E) -> Result<String, SettingsError> {
        self.database_url
            .clone()
            .or_else(|| env.string(DATABASE_URL_ENV))
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Socket address for the HTTP listener.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidHost`] when the host is not an IP
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host();
        let ip: IpAddr = host.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidHost {
                host: host.to_owned(),
                message: err.to_string(),
            }
        })?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Pool configuration for `database_url` using the configured limits.
    pub fn pool_config(&self, database_url: impl Into<String>) -> PoolConfig {
        PoolConfig::new(database_url)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_MIN_IDLE)))
            .with_connection_timeout(
                self.connection_timeout_secs
                    .map_or(DEFAULT_CONNECTION_TIMEOUT, Duration::from_secs),
            )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::collections::HashMap;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use mockable::MockEnv;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "TODOS_DATABASE_URL",
        "TODOS_HOST",
        "TODOS_PORT",
        "TODOS_POOL_MAX_SIZE",
        "TODOS_POOL_MIN_IDLE",
        "TODOS_CONNECTION_TIMEOUT_SECS",
        "TODOS_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("todos")]).expect("config should load")
    }

    fn mock_env(vars: HashMap<&'static str, &'static str>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).map(|value| (*value).to_owned()));
        env
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert!(settings.run_migrations());
        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );

        let pool = settings.pool_config("postgres://localhost/todos");
        assert_eq!(pool.max_size(), DEFAULT_MAX_SIZE);
        assert_eq!(pool.min_idle(), Some(DEFAULT_MIN_IDLE));
        assert_eq!(pool.connection_timeout(), DEFAULT_CONNECTION_TIMEOUT);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("TODOS_DATABASE_URL", Some("postgres://db/todos".to_owned())),
            ("TODOS_HOST", Some("127.0.0.1".to_owned())),
            ("TODOS_PORT", Some("9090".to_owned())),
            ("TODOS_POOL_MAX_SIZE", Some("4".to_owned())),
            ("TODOS_POOL_MIN_IDLE", Some("1".to_owned())),
            ("TODOS_CONNECTION_TIMEOUT_SECS", Some("5".to_owned())),
            ("TODOS_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("bind address"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
        assert!(!settings.run_migrations());
        assert_eq!(
            settings.database_url(&mock_env(HashMap::new())),
            Ok("postgres://db/todos".to_owned())
        );

        let pool = settings.pool_config("postgres://db/todos");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(pool.min_idle(), Some(1));
        assert_eq!(pool.connection_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn database_url_falls_back_to_plain_variable() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        let env = mock_env(HashMap::from([(DATABASE_URL_ENV, "postgres://fallback/todos")]));
        assert_eq!(
            settings.database_url(&env),
            Ok("postgres://fallback/todos".to_owned())
        );
    }

    #[rstest]
    fn missing_database_url_is_an_error() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url(&mock_env(HashMap::new())),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    fn hostnames_are_rejected_as_bind_hosts() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let mut settings = load_from_empty_args();
        settings.host = Some("localhost".to_owned());
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidHost { .. })
        ));
    }
}
