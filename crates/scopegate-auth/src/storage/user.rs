//! User storage trait.
//!
//! Defines the interface for user persistence operations.
//! Implementations are provided by storage backends (e.g., in-memory).

use async_trait::async_trait;

use crate::AuthResult;
use crate::types::{User, UserField};

// =============================================================================
// User Storage Trait
// =============================================================================

/// Storage operations for users.
///
/// # Consistency
///
/// The consent service reads a whole user, mutates the ledger in memory and
/// writes it back with [`UserStorage::update`]. Implementations must apply a
/// single update atomically; concurrent updates of the same user are
/// last-writer-wins unless the backend serializes them.
///
/// # Example
///
/// ```ignore
/// use scopegate_auth::storage::UserStorage;
/// use scopegate_auth::types::UserField;
///
/// async fn example(storage: &impl UserStorage) -> AuthResult<()> {
///     if let Some(mut user) = storage.find_by_id("built-in/alice").await? {
///         user.application_scopes.grant("admin/app", ["read"]);
///         storage.update(&user, &[UserField::ApplicationScopes]).await?;
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Find a user by their identifier (`owner/name`).
    ///
    /// Returns `None` if the user doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    async fn find_by_id(&self, user_id: &str) -> AuthResult<Option<User>>;

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A user with the same identifier already exists
    /// - The storage operation fails
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Update an existing user.
    ///
    /// Only the listed fields are written; an empty list writes every field.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The user doesn't exist
    /// - The storage operation fails
    async fn update(&self, user: &User, fields: &[UserField]) -> AuthResult<()>;
}
