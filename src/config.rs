//! Environment configuration for the API and web client processes.
//!
//! Values are read through a lookup function so parsing can be exercised
//! without mutating the process environment. [`ServerConfig::from_env`] and
//! [`ClientConfig::from_env`] load a `.env` file first when one is present.

use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_DB_NAME: &str = "postgres";
const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_API_HOST: &str = "0.0.0.0";
const DEFAULT_API_PORT: u16 = 3001;
const DEFAULT_API_URL: &str = "http://localhost:3001";
const DEFAULT_WEB_HOST: &str = "0.0.0.0";
const DEFAULT_WEB_PORT: u16 = 3000;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable was set to a value that could not be used.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// Reason the value was rejected.
        message: String,
    },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_owned(),
            message: message.into(),
        }
    }
}

/// Browser origin allowed to call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigin {
    /// Any origin (`*`).
    Any,
    /// A single exact origin.
    Exact(String),
}

impl FromStr for AllowedOrigin {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" => Err(ConfigError::invalid("FRONTEND_URL", "must not be empty")),
            "*" => Ok(Self::Any),
            origin => Ok(Self::Exact(origin.trim_end_matches('/').to_owned())),
        }
    }
}

impl fmt::Display for AllowedOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Exact(origin) => f.write_str(origin),
        }
    }
}

/// Storage connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    url: Option<String>,
    host: String,
    port: u16,
    name: String,
    user: String,
    password: Option<String>,
    pool_size: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("pool_size", &self.pool_size)
            .finish()
    }
}

impl DatabaseConfig {
    /// Reads database settings through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `DB_PORT` or
    /// `DB_POOL_SIZE` is not a valid positive number.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pool_size = parsed_or(lookup, "DB_POOL_SIZE", DEFAULT_POOL_SIZE)?;
        if pool_size == 0 {
            return Err(ConfigError::invalid(
                "DB_POOL_SIZE",
                "must be greater than zero",
            ));
        }
        Ok(Self {
            url: non_empty(lookup, "DATABASE_URL"),
            host: string_or(lookup, "DB_HOST", DEFAULT_DB_HOST),
            port: parsed_or(lookup, "DB_PORT", DEFAULT_DB_PORT)?,
            name: string_or(lookup, "DB_NAME", DEFAULT_DB_NAME),
            user: string_or(lookup, "DB_USER", DEFAULT_DB_USER),
            password: lookup("DB_PASSWORD"),
            pool_size,
        })
    }

    /// Returns the connection string handed to the pool.
    ///
    /// `DATABASE_URL` is used verbatim when set; otherwise a libpq
    /// keyword/value string is assembled from the `DB_*` parts.
    #[must_use]
    pub fn connection_string(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        let mut parts = vec![
            format!("host={}", conninfo_escape(&self.host)),
            format!("port={}", self.port),
            format!("dbname={}", conninfo_escape(&self.name)),
            format!("user={}", conninfo_escape(&self.user)),
        ];
        if let Some(password) = &self.password {
            parts.push(format!("password={}", conninfo_escape(password)));
        }
        parts.join(" ")
    }

    /// Maximum number of pooled connections.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }
}

/// Settings for the REST API process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Origin allowed by the CORS layer.
    pub allowed_origin: AllowedOrigin,
    /// Storage settings.
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(&|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unusable value.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origin =
            lookup("FRONTEND_URL").map_or(Ok(AllowedOrigin::Any), |value| value.parse())?;
        Ok(Self {
            host: string_or(lookup, "HOST", DEFAULT_API_HOST),
            port: parsed_or(lookup, "PORT", DEFAULT_API_PORT)?,
            allowed_origin,
            database: DatabaseConfig::from_lookup(lookup)?,
        })
    }

    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for the browser client process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,
    /// Bind host.
    pub host: String,
    /// Listen port.
    pub port: u16,
}

impl ClientConfig {
    /// Loads `.env` if present, then reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(&|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unusable value.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = string_or(lookup, "TASKBOARD_API_URL", DEFAULT_API_URL);
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "TASKBOARD_API_URL",
                "must be an http or https URL",
            ));
        }
        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            host: string_or(lookup, "WEB_HOST", DEFAULT_WEB_HOST),
            port: parsed_or(lookup, "WEB_PORT", DEFAULT_WEB_PORT)?,
        })
    }

    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn string_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).unwrap_or_else(|| default.to_owned())
}

fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    non_empty(lookup, key).map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|err: T::Err| ConfigError::invalid(key, format!("{raw:?}: {err}")))
    })
}

/// Quotes a value for a libpq keyword/value connection string.
///
/// Backslashes and single quotes are escaped with a backslash and the whole
/// value is wrapped in single quotes.
fn conninfo_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);
    escaped.push('\'');
    for ch in value.chars() {
        if matches!(ch, '\'' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('\'');
    escaped
}
