//! Consent workflow service.
//!
//! Loads the caller's ledger, applies grant or revoke, persists the whole
//! ledger and, for grants, hands the original OAuth parameters to the code
//! issuer.
//!
//! # Grant then issue
//!
//! ```text
//! client_id → application ─► application id matches request?
//!     └─► load user → ledger.grant → persist applicationScopes
//!         └─► issue code
//! ```
//!
//! Persisting the grant and issuing the code are two sequential steps. When
//! issuance fails the grant stays recorded; callers retry the whole request.

use std::sync::Arc;

use serde::Deserialize;

use crate::AuthResult;
use crate::consent::{ConsentCheck, ConsentPolicy, ConsentRecord, RevokeOutcome};
use crate::error::AuthError;
use crate::oauth::{CodeIssuer, CodeRequest};
use crate::storage::{ApplicationStorage, UserStorage};
use crate::types::{Application, User, UserField};

// =============================================================================
// Request Types
// =============================================================================

/// Body of a grant-consent request.
///
/// Carries the scopes approved on the consent screen together with the
/// OAuth parameters of the pending authorization request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrantConsentRequest {
    /// Application identifier (`owner/name`).
    pub application: String,
    /// Scopes the user approved.
    pub granted_scopes: Vec<String>,
    /// OAuth client identifier.
    pub client_id: String,
    /// Identity provider used to sign in.
    pub provider: String,
    /// Sign-in method.
    pub signin_method: String,
    /// OAuth response type.
    pub response_type: String,
    /// Redirect URI.
    pub redirect_uri: String,
    /// Requested scope string.
    pub scope: String,
    /// CSRF state.
    pub state: String,
    /// OpenID Connect nonce.
    pub nonce: String,
    /// PKCE code challenge.
    pub challenge: String,
    /// Resource indicator.
    pub resource: String,
}

/// Body of a revoke-consent request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevokeConsentRequest {
    /// Application identifier (`owner/name`).
    pub application: String,
    /// Scopes to revoke.
    pub granted_scopes: Vec<String>,
}

/// Transport details forwarded to code issuance.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    /// Host the request was received on.
    pub host: String,
    /// The caller's `Accept-Language` header.
    pub accept_language: String,
}

// =============================================================================
// Consent Service
// =============================================================================

/// Orchestrates consent checks and ledger mutations.
pub struct ConsentService {
    user_storage: Arc<dyn UserStorage>,
    application_storage: Arc<dyn ApplicationStorage>,
    code_issuer: Arc<dyn CodeIssuer>,
    policy_enabled: bool,
}

impl ConsentService {
    /// Creates a new consent service with the consent policy enabled.
    #[must_use]
    pub fn new(
        user_storage: Arc<dyn UserStorage>,
        application_storage: Arc<dyn ApplicationStorage>,
        code_issuer: Arc<dyn CodeIssuer>,
    ) -> Self {
        Self {
            user_storage,
            application_storage,
            code_issuer,
            policy_enabled: true,
        }
    }

    /// Enables or disables the consent policy for [`ConsentService::check`].
    #[must_use]
    pub fn with_policy_enabled(mut self, enabled: bool) -> Self {
        self.policy_enabled = enabled;
        self
    }

    /// Records consent and issues an authorization code.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The client id is unknown (`InvalidClient`)
    /// - `request.application` differs from the client's application (`InvalidApplication`)
    /// - The user does not exist (`UserNotFound`)
    /// - Persisting the ledger fails (`Storage`)
    /// - Code issuance fails; the grant stays recorded in that case
    pub async fn grant_and_issue(
        &self,
        user_id: &str,
        request: GrantConsentRequest,
        meta: RequestMeta,
    ) -> AuthResult<String> {
        let application = self.resolve_client(&request.client_id).await?;
        let application_id = application.id();

        if request.application != application_id {
            tracing::warn!(
                user_id = %user_id,
                client_id = %request.client_id,
                requested = %request.application,
                expected = %application_id,
                "Consent grant rejected: application does not match client"
            );
            return Err(AuthError::invalid_application("Invalid application"));
        }

        let mut user = self.load_user(user_id).await?;
        let outcome = user
            .application_scopes
            .grant(&application_id, request.granted_scopes.iter().map(String::as_str));

        self.user_storage
            .update(&user, &[UserField::ApplicationScopes])
            .await?;

        tracing::info!(
            user_id = %user_id,
            application = %application_id,
            created = outcome.created,
            added = outcome.added,
            "Consent granted"
        );

        let code_request = CodeRequest {
            user_id: user_id.to_string(),
            client_id: request.client_id,
            provider: request.provider,
            signin_method: request.signin_method,
            response_type: request.response_type,
            redirect_uri: request.redirect_uri,
            scope: request.scope,
            state: request.state,
            nonce: request.nonce,
            challenge: request.challenge,
            resource: request.resource,
            host: meta.host,
            accept_language: meta.accept_language,
        };

        match self.code_issuer.issue(&code_request).await {
            Ok(code) => Ok(code.code),
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    application = %application_id,
                    error = %e,
                    "Code issuance failed after consent was recorded"
                );
                Err(e)
            }
        }
    }

    /// Revokes scopes from the caller's ledger.
    ///
    /// Returns `true` once the rewritten ledger has been persisted, including
    /// when the application had no record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `application` or `granted_scopes` is empty (`InvalidRequest`)
    /// - The user does not exist (`UserNotFound`)
    /// - Persisting the ledger fails (`Storage`)
    pub async fn revoke(&self, user_id: &str, request: RevokeConsentRequest) -> AuthResult<bool> {
        if request.application.is_empty() {
            return Err(AuthError::invalid_request("Application cannot be empty"));
        }
        if request.granted_scopes.is_empty() {
            return Err(AuthError::invalid_request("Granted scopes cannot be empty"));
        }

        let mut user = self.load_user(user_id).await?;
        let outcome = user.application_scopes.revoke(
            &request.application,
            request.granted_scopes.iter().map(String::as_str),
        )?;

        self.user_storage
            .update(&user, &[UserField::ApplicationScopes])
            .await?;

        match outcome {
            RevokeOutcome::NoRecord => tracing::debug!(
                user_id = %user_id,
                application = %request.application,
                "No consent recorded for application"
            ),
            RevokeOutcome::Narrowed { removed, remaining } => tracing::info!(
                user_id = %user_id,
                application = %request.application,
                removed,
                remaining,
                "Consent narrowed"
            ),
            RevokeOutcome::Deleted { removed } => tracing::info!(
                user_id = %user_id,
                application = %request.application,
                removed,
                "Consent revoked for application"
            ),
        }

        Ok(true)
    }

    /// Decides whether the caller must consent to a pending request.
    ///
    /// # Errors
    ///
    /// Returns an error if the client id or the user is unknown, or if
    /// storage fails.
    pub async fn check(
        &self,
        user_id: &str,
        client_id: &str,
        scope: &str,
    ) -> AuthResult<ConsentCheck> {
        let application = self.resolve_client(client_id).await?;
        let user = self.load_user(user_id).await?;

        let mut check = ConsentPolicy::evaluate(
            &user.application_scopes,
            &application.id(),
            &application.custom_scopes,
            scope,
        );
        if !self.policy_enabled {
            check.required = false;
        }

        Ok(check)
    }

    /// Lists the caller's consent records.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is unknown or storage fails.
    pub async fn list(&self, user_id: &str) -> AuthResult<Vec<ConsentRecord>> {
        let user = self.load_user(user_id).await?;
        Ok(user.application_scopes.records())
    }

    async fn resolve_client(&self, client_id: &str) -> AuthResult<Application> {
        self.application_storage
            .find_by_client_id(client_id)
            .await?
            .ok_or_else(|| AuthError::invalid_client("Invalid client_id"))
    }

    async fn load_user(&self, user_id: &str) -> AuthResult<User> {
        self.user_storage.find_by_id(user_id).await?.ok_or_else(|| {
            tracing::debug!(user_id = %user_id, "User not found");
            AuthError::user_not_found(user_id)
        })
    }
}
