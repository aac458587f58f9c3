//! Authorization code sessions.
//!
//! A session is created for every issued authorization code. It carries the
//! validated request parameters so the token endpoint can later redeem the
//! code.
//!
//! # Security
//!
//! - Authorization codes are cryptographically random (256 bits)
//! - Sessions expire after a short time (default 10 minutes)
//! - The PKCE challenge is stored for verification at token exchange

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Authorization session stored for an issued code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationSession {
    /// Unique session identifier.
    pub id: Uuid,

    /// Authorization code, 256-bit random value, base64url-encoded.
    pub code: String,

    /// Client identifier that initiated the request.
    pub client_id: String,

    /// Application identifier (`owner/name`) the client belongs to.
    pub application: String,

    /// User who authorized the request.
    pub user_id: String,

    /// Redirect URI from the authorization request.
    pub redirect_uri: String,

    /// Requested scopes (space-separated).
    pub scope: String,

    /// State parameter from the authorization request.
    pub state: String,

    /// OpenID Connect nonce for ID token binding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    /// PKCE code challenge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_challenge: Option<String>,

    /// Resource indicator (RFC 8707).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,

    /// Timestamp when the session was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// Timestamp when the session expires.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl AuthorizationSession {
    /// Generates a new cryptographically secure authorization code.
    ///
    /// The code is 256 bits (32 bytes) of random data, encoded as
    /// base64url without padding (43 characters).
    #[must_use]
    pub fn generate_code() -> String {
        let mut bytes = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Returns `true` if the session has expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        OffsetDateTime::now_utc() >= self.expires_at
    }
}

/// Converts an empty string into `None`.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    #[test]
    fn test_generate_code_length_and_uniqueness() {
        let a = AuthorizationSession::generate_code();
        let b = AuthorizationSession::generate_code();
        assert_eq!(a.len(), 43);
        assert_ne!(a, b);
        assert!(URL_SAFE_NO_PAD.decode(&a).is_ok());
    }

    #[test]
    fn test_is_expired() {
        let now = OffsetDateTime::now_utc();
        let mut session = AuthorizationSession {
            id: Uuid::new_v4(),
            code: AuthorizationSession::generate_code(),
            client_id: "client".to_string(),
            application: "admin/app".to_string(),
            user_id: "built-in/alice".to_string(),
            redirect_uri: "https://app.example.com/callback".to_string(),
            scope: "read".to_string(),
            state: "state".to_string(),
            nonce: None,
            code_challenge: None,
            resource: None,
            created_at: now,
            expires_at: now + Duration::minutes(10),
        };
        assert!(!session.is_expired());

        session.expires_at = now - Duration::seconds(1);
        assert!(session.is_expired());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty("n"), Some("n".to_string()));
    }
}
