//! Process configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is read first when present. Both
//! configurations can also be built from an arbitrary lookup function via
//! `from_lookup`, which keeps tests independent of the process environment.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    /// A variable is set to a value that cannot be used.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The `.env` file exists but could not be read.
    #[error("failed to load .env file: {0}")]
    DotEnv(String),
}

/// Storage backend used by the task service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// `PostgreSQL` through a diesel connection pool.
    #[default]
    Postgres,
    /// Process-local in-memory map.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected `postgres` or `memory`, got `{other}`")),
        }
    }
}

/// Task service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Selected storage backend.
    pub storage: StorageBackend,
    /// Database URL; `None` only for [`StorageBackend::Memory`].
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_size: u32,
    /// RPC listen host.
    pub host: String,
    /// RPC listen port.
    pub port: u16,
}

impl ServiceConfig {
    /// Loads the task service configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `TASKS_STORAGE`: `postgres` (default) or `memory`
    /// - `DATABASE_URL`: connection string; when unset it is assembled from
    ///   `POSTGRES_USER`, `POSTGRES_PASSWORD`, `POSTGRES_HOST`,
    ///   `POSTGRES_PORT` and `POSTGRES_DB`
    /// - `DATABASE_POOL_SIZE`: default `10`
    /// - `INTERNAL_SERVER_HOST`: default `0.0.0.0`
    /// - `INTERNAL_SERVER_PORT`: default `50051`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv()?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`ServiceConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage: StorageBackend = optional_parsed(&lookup, "TASKS_STORAGE", StorageBackend::Postgres)?;
        let database_url = match storage {
            StorageBackend::Memory => lookup("DATABASE_URL"),
            StorageBackend::Postgres => Some(database_url(&lookup)?),
        };

        let pool_size = optional_parsed(&lookup, "DATABASE_POOL_SIZE", 10_u32)?;
        if pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DATABASE_POOL_SIZE".to_owned(),
                message: "must be at least 1".to_owned(),
            });
        }

        Ok(Self {
            storage,
            database_url,
            pool_size,
            host: lookup("INTERNAL_SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: optional_parsed(&lookup, "INTERNAL_SERVER_PORT", 50051)?,
        })
    }
}

/// Per-route deadlines for calls to the task service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Deadline for `ListTasks`.
    pub list: Duration,
    /// Deadline for every other call.
    pub call: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            list: Duration::from_secs(10),
            call: Duration::from_secs(5),
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the task service, e.g. `http://task-service:50051`.
    pub service_url: String,
    /// HTTP listen host.
    pub host: String,
    /// HTTP listen port.
    pub port: u16,
    /// Deadlines applied to task service calls.
    pub timeouts: Timeouts,
}

impl GatewayConfig {
    /// Loads the gateway configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `GRPC_SERVER_HOST`, `GRPC_SERVER_PORT`: task service address
    ///   (required)
    /// - `API_GATEWAY_HOST`: default `0.0.0.0`
    /// - `API_GATEWAY_PORT`: default `8080`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv()?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`GatewayConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let service_host = required(&lookup, "GRPC_SERVER_HOST")?;
        let service_port: u16 = required_parsed(&lookup, "GRPC_SERVER_PORT")?;

        Ok(Self {
            service_url: format!("http://{service_host}:{service_port}"),
            host: lookup("API_GATEWAY_HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: optional_parsed(&lookup, "API_GATEWAY_PORT", 8080)?,
            timeouts: Timeouts::default(),
        })
    }
}

fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(ConfigError::DotEnv(err.to_string())),
    }
}

fn database_url(lookup: &impl Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    if let Some(url) = lookup("DATABASE_URL") {
        return Ok(url);
    }
    let user = required(lookup, "POSTGRES_USER")?;
    let password = required(lookup, "POSTGRES_PASSWORD")?;
    let host = required(lookup, "POSTGRES_HOST")?;
    let port: u16 = required_parsed(lookup, "POSTGRES_PORT")?;
    let database = required(lookup, "POSTGRES_DB")?;
    Ok(format!(
        "postgres://{user}:{password}@{host}:{port}/{database}?sslmode=disable"
    ))
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_owned()))
}

fn required_parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    parse_value(key, &required(lookup, key)?)
}

fn optional_parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    lookup(key).map_or(Ok(default), |value| parse_value(key, &value))
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    value.trim().parse().map_err(|err: T::Err| ConfigError::InvalidValue {
        key: key.to_owned(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[rstest]
    fn service_defaults_apply_with_explicit_url() {
        let config = ServiceConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://tasks@localhost/tasks",
        )]))
        .expect("config loads");

        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.database_url.as_deref(), Some("postgres://tasks@localhost/tasks"));
        assert_eq!(config.pool_size, 10);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 50051);
    }

    #[rstest]
    fn service_assembles_url_from_parts() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("POSTGRES_USER", "app"),
            ("POSTGRES_PASSWORD", "secret"),
            ("POSTGRES_HOST", "db"),
            ("POSTGRES_PORT", "5432"),
            ("POSTGRES_DB", "tasks"),
            ("INTERNAL_SERVER_PORT", "6000"),
        ]))
        .expect("config loads");

        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://app:secret@db:5432/tasks?sslmode=disable")
        );
        assert_eq!(config.port, 6000);
    }

    #[rstest]
    fn service_reports_first_missing_part() {
        let err = ServiceConfig::from_lookup(lookup_from(&[("POSTGRES_USER", "app")]))
            .expect_err("password is missing");
        assert_eq!(err, ConfigError::MissingEnvVar("POSTGRES_PASSWORD".to_owned()));
    }

    #[rstest]
    fn memory_storage_needs_no_database() {
        let config = ServiceConfig::from_lookup(lookup_from(&[("TASKS_STORAGE", "Memory")]))
            .expect("config loads");
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.database_url, None);
    }

    #[rstest]
    #[case("TASKS_STORAGE", "sqlite")]
    #[case("INTERNAL_SERVER_PORT", "not-a-port")]
    #[case("DATABASE_POOL_SIZE", "0")]
    fn service_rejects_invalid_values(#[case] key: &str, #[case] value: &str) {
        let err = ServiceConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/tasks"),
            (key, value),
        ]))
        .expect_err("value is invalid");
        assert!(matches!(err, ConfigError::InvalidValue { key: ref k, .. } if k == key));
    }

    #[rstest]
    fn gateway_builds_service_url() {
        let config = GatewayConfig::from_lookup(lookup_from(&[
            ("GRPC_SERVER_HOST", "task-service"),
            ("GRPC_SERVER_PORT", "50051"),
        ]))
        .expect("config loads");

        assert_eq!(config.service_url, "http://task-service:50051");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.timeouts, Timeouts::default());
    }

    #[rstest]
    #[case(&[("GRPC_SERVER_PORT", "50051")], "GRPC_SERVER_HOST")]
    #[case(&[("GRPC_SERVER_HOST", "task-service")], "GRPC_SERVER_PORT")]
    fn gateway_requires_service_address(#[case] pairs: &[(&str, &str)], #[case] missing: &str) {
        let err = GatewayConfig::from_lookup(lookup_from(pairs)).expect_err("address incomplete");
        assert_eq!(err, ConfigError::MissingEnvVar(missing.to_owned()));
    }
}
