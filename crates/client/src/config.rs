//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PLATTER_API_BASE_URL` - Base URL of the platform backend
//!   (e.g., `https://api.platter.example/`)
//!
//! ## Optional
//! - `PLATTER_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)

use std::time::Duration;

use thiserror::Error;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Owner client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the platform backend. Resource paths are joined onto it.
    pub base_url: String,
    /// Timeout applied to every request by the transport layer.
    ///
    /// The lifecycle layer never retries; a timed-out request surfaces as a
    /// transport error with local state unchanged.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a config with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `PLATTER_API_BASE_URL` is
    /// unset, or `ConfigError::InvalidEnvVar` if the timeout is not a
    /// positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("PLATTER_API_BASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("PLATTER_API_BASE_URL".to_owned()))?;

        let timeout = match std::env::var("PLATTER_HTTP_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    ConfigError::InvalidEnvVar(
                        "PLATTER_HTTP_TIMEOUT_SECS".to_owned(),
                        format!("expected a positive integer, got {raw:?}"),
                    )
                })?;
                if secs == 0 {
                    return Err(ConfigError::InvalidEnvVar(
                        "PLATTER_HTTP_TIMEOUT_SECS".to_owned(),
                        "timeout must be greater than zero".to_owned(),
                    ));
                }
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self { base_url, timeout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_default_timeout() {
        let config = ClientConfig::new("http://localhost:3000/");
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.base_url, "http://localhost:3000/");
    }
}
