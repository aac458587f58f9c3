//! # scopegate-auth
//!
//! Consent management for the ScopeGate OAuth authorization server.
//!
//! This crate provides:
//! - The per-user consent ledger with grant and revoke
//! - The ask-once consent policy for authorization requests
//! - Authorization code issuance after consent
//! - Axum handlers for the consent endpoints
//!
//! ## Overview
//!
//! A user approves scopes for an application once. Later authorization
//! requests for the same or fewer declared scopes skip the consent screen.
//! Scopes the application does not declare in its catalog never trigger a
//! prompt. Grant records whatever scopes the user approved, declared or not.
//!
//! ## Modules
//!
//! - [`config`] - Consent and authorization configuration
//! - [`consent`] - Scope sets, scope catalogs, the ledger and the policy
//! - [`service`] - Grant-and-issue and revoke workflows
//! - [`oauth`] - Authorization code issuance
//! - [`middleware`] - Caller authentication via login sessions
//! - [`storage`] - Storage traits for users, applications and sessions
//! - [`http`] - Axum HTTP handlers for the consent endpoints

pub mod config;
pub mod consent;
pub mod error;
pub mod http;
pub mod middleware;
pub mod oauth;
pub mod service;
pub mod storage;
pub mod types;

pub use config::{AuthConfig, ConfigError};
pub use consent::{
    ConsentCheck, ConsentLedger, ConsentPolicy, ConsentRecord, ScopeCatalog, ScopeDescription,
    ScopeSet,
};
pub use error::{AuthError, ErrorCategory};
pub use http::{ConsentState, consent_routes};
pub use middleware::{SessionAuthState, SessionUser};
pub use oauth::{AuthorizationConfig, AuthorizationService, CodeIssuer, CodeRequest};
pub use service::{ConsentService, GrantConsentRequest, RequestMeta, RevokeConsentRequest};
pub use storage::{ApplicationStorage, LoginSessionStorage, SessionStorage, UserStorage};
pub use types::{Application, ApplicationValidationError, User, UserField};

/// Type alias for consent and authorization results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use scopegate_auth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AuthResult;
    pub use crate::config::{AuthConfig, ConfigError};
    pub use crate::consent::{
        ConsentCheck, ConsentLedger, ConsentPolicy, ConsentRecord, GrantOutcome, RevokeOutcome,
        ScopeCatalog, ScopeDescription, ScopeSet,
    };
    pub use crate::error::{AuthError, ErrorCategory};
    pub use crate::http::{ApiResponse, ConsentState, consent_routes};
    pub use crate::middleware::{SessionAuthState, SessionUser};
    pub use crate::oauth::{
        AuthorizationCode, AuthorizationConfig, AuthorizationService, AuthorizationSession,
        CodeIssuer, CodeRequest,
    };
    pub use crate::service::{
        ConsentService, GrantConsentRequest, RequestMeta, RevokeConsentRequest,
    };
    pub use crate::storage::{ApplicationStorage, LoginSessionStorage, SessionStorage, UserStorage};
    pub use crate::types::{Application, User, UserField};
}
