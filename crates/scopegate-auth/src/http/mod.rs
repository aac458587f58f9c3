//! HTTP endpoints for consent management.
//!
//! - [`consent`] - grant, revoke, list and check handlers
//! - [`error`] - JSON error responses for [`crate::AuthError`]
//!
//! # Example
//!
//! ```ignore
//! use scopegate_auth::http::{ConsentState, consent_routes};
//!
//! let app = consent_routes().with_state(ConsentState::new(service, session));
//! ```

pub mod consent;
pub mod error;

pub use consent::{
    ApiResponse, ConsentCheckQuery, ConsentState, consent_check_handler, consent_routes,
    grant_consent_handler, list_consents_handler, revoke_consent_handler,
};
