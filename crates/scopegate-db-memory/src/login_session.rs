//! In-memory login session storage.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use dashmap::DashMap;
use time::{Duration, OffsetDateTime};

use scopegate_auth::AuthResult;
use scopegate_auth::storage::LoginSessionStorage;

#[derive(Debug, Clone)]
struct LoginSession {
    user_id: String,
    expires_at: OffsetDateTime,
}

/// Login sessions keyed by opaque token.
#[derive(Debug)]
pub struct InMemoryLoginSessionStorage {
    sessions: DashMap<String, LoginSession>,
    lifetime: Duration,
}

impl InMemoryLoginSessionStorage {
    /// Creates an empty storage issuing sessions valid for `lifetime`.
    pub fn new(lifetime: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            lifetime,
        }
    }

    /// Number of stored sessions, expired ones included until looked up.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}

#[async_trait]
impl LoginSessionStorage for InMemoryLoginSessionStorage {
    async fn create(&self, user_id: &str) -> AuthResult<String> {
        let token = Self::generate_token();
        self.sessions.insert(
            token.clone(),
            LoginSession {
                user_id: user_id.to_string(),
                expires_at: OffsetDateTime::now_utc() + self.lifetime,
            },
        );
        tracing::debug!(user_id = %user_id, "Login session created");
        Ok(token)
    }

    async fn find_user(&self, token: &str) -> AuthResult<Option<String>> {
        let Some(session) = self.sessions.get(token).map(|s| s.value().clone()) else {
            return Ok(None);
        };

        if OffsetDateTime::now_utc() >= session.expires_at {
            self.sessions.remove(token);
            return Ok(None);
        }

        Ok(Some(session.user_id))
    }

    async fn revoke(&self, token: &str) -> AuthResult<()> {
        self.sessions.remove(token);
        Ok(())
    }
}
