//! Login session extractor.
//!
//! The session token is read from, in order:
//!
//! 1. `Authorization: Session <token>`
//! 2. The session cookie (name configurable, `scopegate_session` by default)

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::CookieJar;

use crate::error::AuthError;
use crate::storage::LoginSessionStorage;

/// Authorization scheme accepted in the `Authorization` header.
const SESSION_SCHEME: &str = "Session ";

/// State required by [`SessionUser`].
///
/// Provide it through `FromRef` from the application state.
#[derive(Clone)]
pub struct SessionAuthState {
    /// Login session lookup.
    pub login_sessions: Arc<dyn LoginSessionStorage>,
    /// Name of the session cookie.
    pub cookie_name: Arc<str>,
}

impl SessionAuthState {
    /// Creates a new session auth state.
    pub fn new(login_sessions: Arc<dyn LoginSessionStorage>, cookie_name: impl Into<Arc<str>>) -> Self {
        Self {
            login_sessions,
            cookie_name: cookie_name.into(),
        }
    }
}

/// The authenticated caller (`owner/name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser(pub String);

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    SessionAuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = SessionAuthState::from_ref(state);

        let Some(token) = session_token(&parts.headers, &auth_state.cookie_name) else {
            return Err(AuthError::unauthorized("Please login first"));
        };

        match auth_state.login_sessions.find_user(&token).await? {
            Some(user_id) => Ok(SessionUser(user_id)),
            None => {
                tracing::debug!("Unknown or expired login session");
                Err(AuthError::unauthorized("Please login first"))
            }
        }
    }
}

/// Extracts the session token from the headers.
fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let from_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(SESSION_SCHEME))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(token) = from_header {
        return Some(token.to_string());
    }

    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty())
}
