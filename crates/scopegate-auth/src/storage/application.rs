//! Application storage trait.
//!
//! Defines the interface for OAuth application persistence operations.

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::Application;

/// Storage operations for OAuth applications.
#[async_trait]
pub trait ApplicationStorage: Send + Sync {
    /// Find an application by its OAuth client_id.
    ///
    /// Returns `None` if no application uses the client id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_client_id(&self, client_id: &str) -> AuthResult<Option<Application>>;

    /// Find an application by its identifier (`owner/name`).
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, application_id: &str) -> AuthResult<Option<Application>>;

    /// Create a new application.
    ///
    /// The application (including its custom scope catalog) is validated
    /// before creation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The application validation fails
    /// - An application with the same id or client id already exists
    /// - The storage operation fails
    async fn create(&self, application: &Application) -> AuthResult<()>;

    /// List all applications.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn list(&self) -> AuthResult<Vec<Application>>;
}
