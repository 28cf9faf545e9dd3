//! Server configuration from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use noteshare_core::DeletePolicy;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected \"pretty\" or \"json\", got \"{other}\"")),
        }
    }
}

/// Identity returned by the placeholder `/api/user` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevUser {
    pub email: String,
    pub name: String,
}

impl Default for DevUser {
    fn default() -> Self {
        Self {
            email: "dev@example.com".to_string(),
            name: "Developer".to_string(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub bind_addr: IpAddr,
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Database connection URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Bound on each document store call.
    pub store_timeout: Duration,
    /// Who may delete a shared note.
    pub delete_policy: DeletePolicy,
    /// Placeholder user for `/api/user`.
    pub dev_user: DevUser,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            cors_allowed_origins: "http://127.0.0.1:5500".to_string(),
            database_url: None,
            store_timeout: Duration::from_millis(5000),
            delete_policy: DeletePolicy::OwnerOrShared,
            dev_user: DevUser::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// All optional:
    /// - `BIND_ADDR`: Address to bind (default: 0.0.0.0)
    /// - `PORT`: Server port (default: 3000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `LOG_FORMAT`: "pretty" or "json" (default: "pretty")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "http://127.0.0.1:5500")
    /// - `DATABASE_URL`: PostgreSQL connection string (default: in-memory store)
    /// - `STORE_TIMEOUT_MS`: Per-call store timeout (default: 5000)
    /// - `NOTE_DELETE_POLICY`: "owner-or-shared" or "owner-only" (default: "owner-or-shared")
    /// - `DEV_USER_EMAIL`, `DEV_USER_NAME`: Identity served by `/api/user`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind_addr = parse_var(&lookup, "BIND_ADDR")?.unwrap_or(defaults.bind_addr);
        let port = parse_var(&lookup, "PORT")?.unwrap_or(defaults.port);
        let log_level = lookup("LOG_LEVEL").unwrap_or(defaults.log_level);
        let log_format = parse_var(&lookup, "LOG_FORMAT")?.unwrap_or(defaults.log_format);
        let cors_allowed_origins =
            lookup("CORS_ALLOWED_ORIGINS").unwrap_or(defaults.cors_allowed_origins);
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let store_timeout = parse_var::<u64, _>(&lookup, "STORE_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.store_timeout);
        let delete_policy =
            parse_var(&lookup, "NOTE_DELETE_POLICY")?.unwrap_or(defaults.delete_policy);
        let dev_user = DevUser {
            email: lookup("DEV_USER_EMAIL").unwrap_or(defaults.dev_user.email),
            name: lookup("DEV_USER_NAME").unwrap_or(defaults.dev_user.name),
        };

        if store_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "STORE_TIMEOUT_MS".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            port,
            log_level,
            log_format,
            cors_allowed_origins,
            database_url,
            store_timeout,
            delete_policy,
            dev_user,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|raw| {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
                name: name.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
