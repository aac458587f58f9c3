//! Authorization code issuance interface.
//!
//! Once consent is recorded, the validated OAuth parameters are exchanged for
//! a short-lived authorization code. The consent service only depends on the
//! [`CodeIssuer`] trait; [`super::AuthorizationService`] is the default
//! implementation.

use async_trait::async_trait;
use serde::Serialize;

use crate::AuthResult;

/// Parameters forwarded to the code issuer.
#[derive(Debug, Clone, Default)]
pub struct CodeRequest {
    /// Authenticated user (`owner/name`).
    pub user_id: String,
    /// OAuth client identifier.
    pub client_id: String,
    /// Identity provider used to sign in, if any.
    pub provider: String,
    /// Sign-in method used by the user, if any.
    pub signin_method: String,
    /// OAuth response type.
    pub response_type: String,
    /// Redirect URI for the authorization response.
    pub redirect_uri: String,
    /// Requested scopes (space-separated).
    pub scope: String,
    /// CSRF state parameter.
    pub state: String,
    /// OpenID Connect nonce.
    pub nonce: String,
    /// PKCE code challenge.
    pub challenge: String,
    /// Resource indicator.
    pub resource: String,
    /// Host the request was received on.
    pub host: String,
    /// Caller's `Accept-Language` header.
    pub accept_language: String,
}

/// An issued authorization code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationCode {
    /// The opaque code value.
    pub code: String,
}

/// Exchanges validated request parameters for an authorization code.
#[async_trait]
pub trait CodeIssuer: Send + Sync {
    /// Issues an authorization code.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is rejected or the code cannot be
    /// persisted.
    async fn issue(&self, request: &CodeRequest) -> AuthResult<AuthorizationCode>;
}
