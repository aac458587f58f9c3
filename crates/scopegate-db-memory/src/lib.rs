//! In-memory storage backend for ScopeGate.
//!
//! This crate implements every storage trait of `scopegate-auth` on top of
//! process-local maps. Data is lost on restart; the server seeds it from its
//! bootstrap configuration.
//!
//! # Example
//!
//! ```ignore
//! use scopegate_db_memory::InMemoryBackend;
//!
//! let backend = InMemoryBackend::new(time::Duration::hours(24));
//! backend.users.create(&User::new("built-in", "alice")).await?;
//! ```

pub mod application;
pub mod login_session;
pub mod session;
pub mod user;

use std::sync::Arc;

pub use application::InMemoryApplicationStorage;
pub use login_session::InMemoryLoginSessionStorage;
pub use session::InMemorySessionStorage;
pub use user::InMemoryUserStorage;

/// All in-memory stores, shareable across services.
#[derive(Clone)]
pub struct InMemoryBackend {
    /// Users and their consent ledgers.
    pub users: Arc<InMemoryUserStorage>,
    /// Registered applications.
    pub applications: Arc<InMemoryApplicationStorage>,
    /// Authorization code sessions.
    pub sessions: Arc<InMemorySessionStorage>,
    /// Login sessions.
    pub login_sessions: Arc<InMemoryLoginSessionStorage>,
}

impl InMemoryBackend {
    /// Creates empty stores. `login_session_lifetime` bounds login sessions.
    pub fn new(login_session_lifetime: time::Duration) -> Self {
        Self {
            users: Arc::new(InMemoryUserStorage::new()),
            applications: Arc::new(InMemoryApplicationStorage::new()),
            sessions: Arc::new(InMemorySessionStorage::new()),
            login_sessions: Arc::new(InMemoryLoginSessionStorage::new(login_session_lifetime)),
        }
    }
}
