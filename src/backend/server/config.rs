/**
 * Server Configuration
 *
 * Configuration is loaded from environment variables (a `.env` file is read
 * by `main` first), with defaults suitable for local development.
 *
 * | Variable                 | Default        |
 * |--------------------------|----------------|
 * | `SERVER_ADDR`            | `0.0.0.0:4000` |
 * | `DATABASE_URL`           | unset          |
 * | `TEMPLATE_DIR`           | `ui/html`      |
 * | `STATIC_DIR`             | `ui/static`    |
 * | `SESSION_LIFETIME_HOURS` | `12`, max 8760 |
 * | `SESSION_COOKIE_NAME`    | `session`      |
 * | `SESSION_COOKIE_SECURE`  | `true`         |
 * | `AUTH_RECHECK_USER`      | `true`         |
 *
 * # Error Handling
 *
 * An unparsable value is a [`ConfigError`] and aborts startup. Leaving
 * `DATABASE_URL` unset is allowed; the server then runs on in-memory
 * storage.
 */

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::backend::middleware::AuthPolicy;
use crate::backend::session::{SessionConfig, MAX_LIFETIME_HOURS};

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub database_url: Option<String>,
    pub template_dir: PathBuf,
    pub static_dir: PathBuf,
    pub session: SessionConfig,
    pub auth_policy: AuthPolicy,
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(value) = lookup("SERVER_ADDR") {
            builder = builder.addr(parse("SERVER_ADDR", &value)?);
        }
        if let Some(value) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            builder = builder.database_url(value);
        }
        if let Some(value) = lookup("TEMPLATE_DIR") {
            builder = builder.template_dir(value);
        }
        if let Some(value) = lookup("STATIC_DIR") {
            builder = builder.static_dir(value);
        }
        if let Some(value) = lookup("SESSION_LIFETIME_HOURS") {
            builder = builder.session_lifetime_hours(parse("SESSION_LIFETIME_HOURS", &value)?);
        }
        if let Some(value) = lookup("SESSION_COOKIE_NAME") {
            builder = builder.session_cookie_name(value);
        }
        if let Some(value) = lookup("SESSION_COOKIE_SECURE") {
            builder = builder.session_cookie_secure(parse_bool("SESSION_COOKIE_SECURE", &value)?);
        }
        if let Some(value) = lookup("AUTH_RECHECK_USER") {
            builder = builder.auth_policy(AuthPolicy::from_recheck(parse_bool(
                "AUTH_RECHECK_USER",
                &value,
            )?));
        }

        builder.build()
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }),
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    addr: Option<SocketAddr>,
    database_url: Option<String>,
    template_dir: Option<PathBuf>,
    static_dir: Option<PathBuf>,
    session_lifetime_hours: Option<i64>,
    session_cookie_name: Option<String>,
    session_cookie_secure: Option<bool>,
    auth_policy: Option<AuthPolicy>,
}

impl ServerConfigBuilder {
    pub fn addr(mut self, addr: SocketAddr) -> Self {
        self.addr = Some(addr);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn session_lifetime_hours(mut self, hours: i64) -> Self {
        self.session_lifetime_hours = Some(hours);
        self
    }

    pub fn session_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.session_cookie_name = Some(name.into());
        self
    }

    pub fn session_cookie_secure(mut self, secure: bool) -> Self {
        self.session_cookie_secure = Some(secure);
        self
    }

    pub fn auth_policy(mut self, policy: AuthPolicy) -> Self {
        self.auth_policy = Some(policy);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let defaults = SessionConfig::default();

        let hours = self
            .session_lifetime_hours
            .unwrap_or(defaults.lifetime.whole_hours());
        if !(1..=MAX_LIFETIME_HOURS).contains(&hours) {
            return Err(ConfigError::InvalidValue {
                name: "SESSION_LIFETIME_HOURS",
                value: hours.to_string(),
            });
        }

        let cookie_name = self.session_cookie_name.unwrap_or(defaults.cookie_name);
        if cookie_name.trim().is_empty() {
            return Err(ConfigError::Empty("SESSION_COOKIE_NAME"));
        }

        Ok(ServerConfig {
            addr: self
                .addr
                .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 4000))),
            database_url: self.database_url,
            template_dir: self.template_dir.unwrap_or_else(|| PathBuf::from("ui/html")),
            static_dir: self.static_dir.unwrap_or_else(|| PathBuf::from("ui/static")),
            session: SessionConfig {
                cookie_name,
                lifetime: time::Duration::hours(hours),
                secure: self.session_cookie_secure.unwrap_or(defaults.secure),
            },
            auth_policy: self.auth_policy.unwrap_or_default(),
        })
    }
}
