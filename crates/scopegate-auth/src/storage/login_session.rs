//! Login session storage trait.
//!
//! A login session maps an opaque session token (carried in a cookie) to the
//! authenticated user. The consent endpoints require one.

use async_trait::async_trait;

use crate::AuthResult;

/// Storage for authenticated login sessions.
#[async_trait]
pub trait LoginSessionStorage: Send + Sync {
    /// Creates a session for the user and returns its token.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn create(&self, user_id: &str) -> AuthResult<String>;

    /// Resolves a session token to the user identifier.
    ///
    /// Returns `None` if the token is unknown or the session has expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_user(&self, token: &str) -> AuthResult<Option<String>>;

    /// Revokes a session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn revoke(&self, token: &str) -> AuthResult<()>;
}
