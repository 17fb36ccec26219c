//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `XOMO_API_URL` - Base URL of the Xomo backend (e.g., `http://localhost:8081`)
//!
//! ## Optional
//! - `XOMO_ADMIN_TOKEN` - Bearer token for the staff session (hydrates the
//!   session context at startup; without it every request is anonymous and
//!   the backend will reject mutations)
//! - `XOMO_REQUEST_TIMEOUT_SECS` - HTTP request timeout (default: 30)

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Console application configuration.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL of the Xomo backend API.
    pub api_base_url: Url,
    /// Bearer token for the staff session, if persisted.
    pub token: Option<SecretString>,
    /// HTTP request timeout in seconds (applied at the transport layer; the
    /// controller itself defines no timeouts).
    pub request_timeout_secs: u64,
}

impl ConsoleConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = required_env("XOMO_API_URL")?;
        let api_base_url = Url::parse(&api_base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("XOMO_API_URL".to_string(), e.to_string()))?;

        let token = std::env::var("XOMO_ADMIN_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .map(SecretString::from);

        let request_timeout_secs = match std::env::var("XOMO_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar(
                    "XOMO_REQUEST_TIMEOUT_SECS".to_string(),
                    format!("not a number: {raw}"),
                )
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base_url,
            token,
            request_timeout_secs,
        })
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(unsafe_code)]
    fn test_missing_api_url_is_an_error() {
        // Isolated from the process env by construction: required_env only
        // reads the one variable we control here.
        unsafe { std::env::remove_var("XOMO_API_URL") };
        let err = ConsoleConfig::from_env().expect_err("missing url");
        assert!(matches!(err, ConfigError::MissingEnvVar(name) if name == "XOMO_API_URL"));
    }
}
