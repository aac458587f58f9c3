//! In-memory authorization code session storage.

use async_trait::async_trait;
use dashmap::DashMap;

use scopegate_auth::AuthResult;
use scopegate_auth::oauth::AuthorizationSession;
use scopegate_auth::storage::SessionStorage;

/// Authorization code sessions keyed by code.
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    sessions: DashMap<String, AuthorizationSession>,
}

impl InMemorySessionStorage {
    /// Creates an empty session storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored sessions, expired ones included.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if no session is stored.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStorage for InMemorySessionStorage {
    async fn create(&self, session: &AuthorizationSession) -> AuthResult<()> {
        self.sessions.insert(session.code.clone(), session.clone());
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> AuthResult<Option<AuthorizationSession>> {
        Ok(self
            .sessions
            .get(code)
            .map(|s| s.value().clone())
            .filter(|s| !s.is_expired()))
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired());
        let removed = before.saturating_sub(self.sessions.len()) as u64;
        if removed > 0 {
            tracing::debug!(removed, "Expired authorization sessions removed");
        }
        Ok(removed)
    }
}
