//! Consent and authorization error types.
//!
//! This module defines all error types that can occur while checking,
//! granting or revoking consent and while issuing authorization codes.

use std::fmt;

/// Errors that can occur during consent and authorization operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The caller has no authenticated session.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Description of why the request is unauthorized.
        message: String,
    },

    /// The request is malformed or misses a required field.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Description of why the request is invalid.
        message: String,
    },

    /// The client identifier does not resolve to a registered application.
    #[error("Invalid client: {message}")]
    InvalidClient {
        /// Description of why the client is invalid.
        message: String,
    },

    /// The application named in the request does not match the application
    /// resolved from the client identifier.
    #[error("Invalid application: {message}")]
    InvalidApplication {
        /// Description of the mismatch.
        message: String,
    },

    /// The authenticated user does not exist in user storage.
    #[error("User not found: {user_id}")]
    UserNotFound {
        /// The user identifier that failed to resolve.
        user_id: String,
    },

    /// A scope catalog entry is invalid.
    #[error("Invalid scope: {message}")]
    InvalidScope {
        /// Description of why the scope is invalid.
        message: String,
    },

    /// The authorization server does not support the requested response type.
    #[error("Unsupported response type: {response_type}")]
    UnsupportedResponseType {
        /// The unsupported response type.
        response_type: String,
    },

    /// The redirect URI is not registered for the application.
    #[error("Redirect URI not allowed: {redirect_uri}")]
    InvalidRedirectUri {
        /// The rejected redirect URI.
        redirect_uri: String,
    },

    /// The PKCE code challenge is malformed.
    #[error("Invalid code challenge: {message}")]
    InvalidCodeChallenge {
        /// Description of why the challenge is invalid.
        message: String,
    },

    /// Authorization code issuance failed for another reason.
    #[error("Code issuance failed: {message}")]
    Issuance {
        /// Description of the issuance failure.
        message: String,
    },

    /// An error occurred while storing or retrieving data.
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error.
        message: String,
    },

    /// The configuration is invalid.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error.
        message: String,
    },

    /// An unexpected internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl AuthError {
    /// Creates a new `Unauthorized` error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidRequest` error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidClient` error.
    #[must_use]
    pub fn invalid_client(message: impl Into<String>) -> Self {
        Self::InvalidClient {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidApplication` error.
    #[must_use]
    pub fn invalid_application(message: impl Into<String>) -> Self {
        Self::InvalidApplication {
            message: message.into(),
        }
    }

    /// Creates a new `UserNotFound` error.
    #[must_use]
    pub fn user_not_found(user_id: impl Into<String>) -> Self {
        Self::UserNotFound {
            user_id: user_id.into(),
        }
    }

    /// Creates a new `InvalidScope` error.
    #[must_use]
    pub fn invalid_scope(message: impl Into<String>) -> Self {
        Self::InvalidScope {
            message: message.into(),
        }
    }

    /// Creates a new `UnsupportedResponseType` error.
    #[must_use]
    pub fn unsupported_response_type(response_type: impl Into<String>) -> Self {
        Self::UnsupportedResponseType {
            response_type: response_type.into(),
        }
    }

    /// Creates a new `InvalidRedirectUri` error.
    #[must_use]
    pub fn invalid_redirect_uri(redirect_uri: impl Into<String>) -> Self {
        Self::InvalidRedirectUri {
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Creates a new `InvalidCodeChallenge` error.
    #[must_use]
    pub fn invalid_code_challenge(message: impl Into<String>) -> Self {
        Self::InvalidCodeChallenge {
            message: message.into(),
        }
    }

    /// Creates a new `Issuance` error.
    #[must_use]
    pub fn issuance(message: impl Into<String>) -> Self {
        Self::Issuance {
            message: message.into(),
        }
    }

    /// Creates a new `Storage` error.
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a new `Configuration` error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns `true` if this error was caused by the caller (4xx category).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::Authentication | ErrorCategory::Referential
        )
    }

    /// Returns `true` if this is a server error (5xx category).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }

    /// Returns the error category for logging and response mapping.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRequest { .. } | Self::InvalidScope { .. } => ErrorCategory::Validation,
            Self::Unauthorized { .. } => ErrorCategory::Authentication,
            Self::InvalidClient { .. }
            | Self::InvalidApplication { .. }
            | Self::UserNotFound { .. } => ErrorCategory::Referential,
            Self::UnsupportedResponseType { .. }
            | Self::InvalidRedirectUri { .. }
            | Self::InvalidCodeChallenge { .. }
            | Self::Issuance { .. } => ErrorCategory::Issuance,
            Self::Storage { .. } => ErrorCategory::Persistence,
            Self::Configuration { .. } | Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Returns a stable snake_case code for this error, used in API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::InvalidClient { .. } => "invalid_client",
            Self::InvalidApplication { .. } => "invalid_application",
            Self::UserNotFound { .. } => "user_not_found",
            Self::InvalidScope { .. } => "invalid_scope",
            Self::UnsupportedResponseType { .. } => "unsupported_response_type",
            Self::InvalidRedirectUri { .. } => "invalid_redirect_uri",
            Self::InvalidCodeChallenge { .. } => "invalid_code_challenge",
            Self::Issuance { .. } => "issuance_failed",
            Self::Storage { .. } => "storage_error",
            Self::Configuration { .. } => "configuration_error",
            Self::Internal { .. } => "server_error",
        }
    }
}

/// Categories of errors, mirroring how the consent workflow reacts to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing or empty required field, malformed body.
    Validation,
    /// No authenticated session.
    Authentication,
    /// Unknown client id, application mismatch, unknown user.
    Referential,
    /// User or session storage failure.
    Persistence,
    /// Authorization code issuance failure.
    Issuance,
    /// Configuration or unexpected internal failure.
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validation => "validation",
            Self::Authentication => "authentication",
            Self::Referential => "referential",
            Self::Persistence => "persistence",
            Self::Issuance => "issuance",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::invalid_request("Application cannot be empty");
        assert_eq!(err.to_string(), "Invalid request: Application cannot be empty");

        let err = AuthError::user_not_found("built-in/alice");
        assert_eq!(err.to_string(), "User not found: built-in/alice");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            AuthError::invalid_request("x").category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            AuthError::unauthorized("x").category(),
            ErrorCategory::Authentication
        );
        assert_eq!(
            AuthError::invalid_client("x").category(),
            ErrorCategory::Referential
        );
        assert_eq!(
            AuthError::invalid_application("x").category(),
            ErrorCategory::Referential
        );
        assert_eq!(
            AuthError::storage("x").category(),
            ErrorCategory::Persistence
        );
        assert_eq!(
            AuthError::unsupported_response_type("token").category(),
            ErrorCategory::Issuance
        );
    }

    #[test]
    fn test_client_and_server_errors() {
        assert!(AuthError::unauthorized("x").is_client_error());
        assert!(AuthError::user_not_found("x").is_client_error());
        assert!(!AuthError::storage("x").is_client_error());
        assert!(AuthError::storage("x").is_server_error());
        assert!(AuthError::issuance("x").is_server_error());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthError::invalid_client("x").error_code(), "invalid_client");
        assert_eq!(AuthError::internal("x").error_code(), "server_error");
        assert_eq!(ErrorCategory::Persistence.to_string(), "persistence");
    }
}
