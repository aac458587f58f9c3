//! In-memory user storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use scopegate_auth::storage::UserStorage;
use scopegate_auth::types::{User, UserField};
use scopegate_auth::{AuthError, AuthResult};

/// User storage backed by a `RwLock<HashMap>`.
///
/// The write lock is held for the whole of an update, so a single update is
/// atomic. Concurrent read-modify-write cycles of one user remain
/// last-writer-wins.
#[derive(Debug, Default)]
pub struct InMemoryUserStorage {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStorage {
    /// Creates an empty user storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns `true` if no user is stored.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStorage for InMemoryUserStorage {
    async fn find_by_id(&self, user_id: &str) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn create(&self, user: &User) -> AuthResult<()> {
        let id = user.id();
        let mut users = self.users.write().await;
        if users.contains_key(&id) {
            return Err(AuthError::storage(format!("User {id} already exists")));
        }
        users.insert(id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User, fields: &[UserField]) -> AuthResult<()> {
        let id = user.id();
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(&id)
            .ok_or_else(|| AuthError::user_not_found(&id))?;
        stored.apply_fields(user, fields);

        tracing::trace!(
            user_id = %id,
            fields = ?fields.iter().map(UserField::as_str).collect::<Vec<_>>(),
            "User updated"
        );
        Ok(())
    }
}
