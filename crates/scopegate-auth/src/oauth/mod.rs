//! OAuth 2.0 authorization code issuance.
//!
//! - [`code`] - the [`CodeIssuer`] seam used by the consent workflow
//! - [`service`] - the default issuer, [`AuthorizationService`]
//! - [`session`] - the stored state behind each issued code

pub mod code;
pub mod service;
pub mod session;

pub use code::{AuthorizationCode, CodeIssuer, CodeRequest};
pub use service::{AuthorizationConfig, AuthorizationService};
pub use session::AuthorizationSession;
