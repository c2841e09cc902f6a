//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOP_REGISTRY_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOP_REGISTRY_PORT` - Listen port (default: 8080)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Sentry event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry tracing sample rate (default: 0.0)
//!
//! ## Record listener (enabled only when `BROKER_HOST` is set)
//! - `BROKER_HOST` - Message broker hostname
//! - `BROKER_PORT` - Broker port (default: 1883)
//! - `BROKER_TOPIC` - Topic to subscribe to (default: topic)
//! - `BROKER_CLIENT_ID` - Client identifier (default: shop-registry)
//! - `BROKER_USERNAME` + `BROKER_PASSWORD` - Credentials; both or neither

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Sentry event sample rate
    pub sentry_sample_rate: f32,
    /// Sentry tracing sample rate
    pub sentry_traces_sample_rate: f32,
    /// Message broker configuration; the record listener runs only when set
    pub broker: Option<BrokerConfig>,
}

/// Message broker connection configuration.
#[derive(Debug, Clone)]
pub struct BrokerConfig {
    /// Broker hostname
    pub host: String,
    /// Broker port
    pub port: u16,
    /// Topic the record listener subscribes to
    pub topic: String,
    /// Client identifier presented to the broker
    pub client_id: String,
    /// Optional authentication credentials
    pub credentials: Option<BrokerCredentials>,
}

/// Broker credentials.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct BrokerCredentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for BrokerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrokerCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse or a credential
    /// pair is incomplete.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SHOP_REGISTRY_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOP_REGISTRY_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("SHOP_REGISTRY_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOP_REGISTRY_PORT".to_string(), e.to_string())
            })?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_f32_or_default("SENTRY_SAMPLE_RATE", 1.0)?;
        let sentry_traces_sample_rate = get_f32_or_default("SENTRY_TRACES_SAMPLE_RATE", 0.0)?;

        let broker = BrokerConfig::from_env()?;

        Ok(Self {
            host,
            port,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
            broker,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl BrokerConfig {
    /// Returns `Ok(None)` when `BROKER_HOST` is absent: the record listener
    /// is an optional component.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(host) = get_optional_env("BROKER_HOST") else {
            return Ok(None);
        };

        let port = get_env_or_default("BROKER_PORT", "1883")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BROKER_PORT".to_string(), e.to_string()))?;
        let topic = get_env_or_default("BROKER_TOPIC", "topic");
        let client_id = get_env_or_default("BROKER_CLIENT_ID", "shop-registry");

        let credentials = match (
            get_optional_env("BROKER_USERNAME"),
            get_optional_env("BROKER_PASSWORD"),
        ) {
            (Some(username), Some(password)) => Some(BrokerCredentials {
                username,
                password: SecretString::from(password),
            }),
            (Some(_), None) => {
                return Err(ConfigError::MissingEnvVar("BROKER_PASSWORD".to_string()));
            }
            (None, Some(_)) => {
                return Err(ConfigError::MissingEnvVar("BROKER_USERNAME".to_string()));
            }
            (None, None) => None,
        };

        Ok(Some(Self {
            host,
            port,
            topic,
            client_id,
            credentials,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an f32 environment variable with a default value.
fn get_f32_or_default(key: &str, default: f32) -> Result<f32, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<f32>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}
