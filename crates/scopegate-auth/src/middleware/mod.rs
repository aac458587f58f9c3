//! HTTP middleware for caller authentication.
//!
//! The consent endpoints act on behalf of a signed-in user. [`SessionUser`]
//! resolves the login session token carried by the request to that user.
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, routing::get};
//! use scopegate_auth::middleware::{SessionAuthState, SessionUser};
//!
//! async fn whoami(SessionUser(user_id): SessionUser) -> String {
//!     user_id
//! }
//!
//! let app = Router::new()
//!     .route("/whoami", get(whoami))
//!     .with_state(SessionAuthState::new(login_sessions, "scopegate_session"));
//! ```

pub mod session;

pub use session::{SessionAuthState, SessionUser};
