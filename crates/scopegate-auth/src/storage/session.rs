//! Authorization code session storage trait.

use async_trait::async_trait;

use crate::AuthResult;
use crate::oauth::session::AuthorizationSession;

/// Storage for issued authorization codes.
///
/// Sessions are created by the code issuer and later redeemed by the token
/// endpoint, which is not part of this crate.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Persists a newly issued authorization session.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn create(&self, session: &AuthorizationSession) -> AuthResult<()>;

    /// Finds a session by its authorization code.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_code(&self, code: &str) -> AuthResult<Option<AuthorizationSession>>;

    /// Removes expired sessions, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
