//! Server settings loaded via OrthoConfig.
//!
//! Values come from `STUDENT_RECORDS_*` environment variables or the matching
//! command-line flags. The database URL has no default and carries the store
//! credentials, so it is never logged.

use std::fmt;
use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_API_PREFIX: &str = "/api";

/// Invalid or missing server settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `STUDENT_RECORDS_DATABASE_URL` is unset or blank.
    #[error("database URL is required; set STUDENT_RECORDS_DATABASE_URL")]
    MissingDatabaseUrl,
    /// The bind address does not parse as `host:port`.
    #[error("invalid bind address `{value}`: {message}")]
    InvalidBindAddr { value: String, message: String },
}

/// Settings for the HTTP server and its record store.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STUDENT_RECORDS")]
pub struct ServerSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Path prefix for the student routes.
    pub api_prefix: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
}

impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .field("bind_addr", &self.bind_addr)
            .field("api_prefix", &self.api_prefix)
            .field("pool_max_size", &self.pool_max_size)
            .finish()
    }
}

impl ServerSettings {
    /// Database URL, required for startup.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Listen address, defaulting to `0.0.0.0:3000`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value is malformed.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR).trim();
        value
            .parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                message: err.to_string(),
            })
    }

    /// Route prefix with one leading slash and no trailing slash.
    ///
    /// A prefix of `/` mounts the routes at the root.
    pub fn api_prefix(&self) -> String {
        let raw = self.api_prefix.as_deref().unwrap_or(DEFAULT_API_PREFIX);
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    /// Pool configuration derived from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when no URL is set.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let config = PoolConfig::new(self.database_url()?);
        Ok(match self.pool_max_size {
            Some(max_size) => config.with_max_size(max_size),
            None => config,
        })
    }
}
