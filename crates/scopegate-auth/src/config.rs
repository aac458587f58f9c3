//! Consent and authorization configuration.
//!
//! # Example (TOML)
//!
//! ```toml
//! [auth.consent]
//! enabled = true
//!
//! [auth.oauth]
//! authorization_code_lifetime = "10m"
//!
//! [auth.session]
//! cookie_name = "scopegate_session"
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{AuthError, AuthResult};

/// Root consent and authorization configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Consent policy configuration.
    pub consent: ConsentConfig,

    /// OAuth 2.0 code issuance configuration.
    pub oauth: OAuthConfig,

    /// Login session configuration.
    pub session: SessionConfig,
}

/// Consent policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsentConfig {
    /// Enable the ask-once consent policy.
    /// When disabled, consent checks always report that no consent is needed.
    /// Grant and revoke keep working so recorded consent is not lost.
    pub enabled: bool,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// OAuth 2.0 configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OAuthConfig {
    /// Authorization code lifetime.
    /// Codes should be short-lived for security.
    #[serde(with = "humantime_serde")]
    pub authorization_code_lifetime: Duration,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            authorization_code_lifetime: Duration::from_secs(600), // 10 minutes
        }
    }
}

/// Login session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the cookie carrying the login session token.
    pub cookie_name: String,

    /// Lifetime of login sessions.
    #[serde(with = "humantime_serde")]
    pub lifetime: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "scopegate_session".to_string(),
            lifetime: Duration::from_secs(24 * 3600), // 24 hours
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An invalid configuration value was provided.
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),

    /// A required configuration value is missing.
    #[error("Missing required configuration: {0}")]
    Missing(String),
}

impl AuthConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The authorization code lifetime is under one second or longer than one hour
    /// - The session cookie name is empty
    /// - The session lifetime is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let code_lifetime = self.oauth.authorization_code_lifetime;
        if code_lifetime < Duration::from_secs(1) {
            return Err(ConfigError::InvalidValue(
                "oauth.authorization_code_lifetime must be at least 1s".to_string(),
            ));
        }
        if code_lifetime > Duration::from_secs(3600) {
            return Err(ConfigError::InvalidValue(
                "oauth.authorization_code_lifetime must not exceed 1h".to_string(),
            ));
        }

        if self.session.cookie_name.trim().is_empty() {
            return Err(ConfigError::Missing("session.cookie_name".to_string()));
        }

        if self.session.lifetime.is_zero() {
            return Err(ConfigError::InvalidValue(
                "session.lifetime must be > 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns the authorization code lifetime as a `time::Duration`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lifetime does not fit a `time::Duration`.
    pub fn code_lifetime(&self) -> AuthResult<time::Duration> {
        Ok(to_time_duration(
            "oauth.authorization_code_lifetime",
            self.oauth.authorization_code_lifetime,
        )?)
    }

    /// Returns the login session lifetime as a `time::Duration`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lifetime does not fit a `time::Duration`.
    pub fn session_lifetime(&self) -> AuthResult<time::Duration> {
        Ok(to_time_duration("session.lifetime", self.session.lifetime)?)
    }
}

fn to_time_duration(key: &str, value: Duration) -> Result<time::Duration, ConfigError> {
    time::Duration::try_from(value)
        .map_err(|_| ConfigError::InvalidValue(format!("{key} is out of range")))
}

impl From<ConfigError> for AuthError {
    fn from(err: ConfigError) -> Self {
        Self::configuration(err.to_string())
    }
}
