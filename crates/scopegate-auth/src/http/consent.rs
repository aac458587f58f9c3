//! Consent endpoint handlers.
//!
//! # Routes
//!
//! ```text
//! POST /api/grant-consent    record consent, answer with an authorization code
//! POST /api/revoke-consent   remove scopes from a consent record
//! GET  /api/consents         list the caller's consent records
//! GET  /api/consent-check    decide whether a request needs consent
//! ```
//!
//! Successful responses use the `{ "status": "ok", "data": ... }` envelope.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        FromRef, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, header},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::consent::{ConsentCheck, ConsentRecord};
use crate::error::AuthError;
use crate::middleware::{SessionAuthState, SessionUser};
use crate::service::{ConsentService, GrantConsentRequest, RequestMeta, RevokeConsentRequest};

// =============================================================================
// State Types
// =============================================================================

/// State required by the consent endpoints.
#[derive(Clone)]
pub struct ConsentState {
    /// Consent workflow service.
    pub service: Arc<ConsentService>,
    /// Caller authentication.
    pub session: SessionAuthState,
}

impl ConsentState {
    /// Creates a new consent state.
    pub fn new(service: Arc<ConsentService>, session: SessionAuthState) -> Self {
        Self { service, session }
    }
}

impl FromRef<ConsentState> for SessionAuthState {
    fn from_ref(state: &ConsentState) -> Self {
        state.session.clone()
    }
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Response payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self { status: "ok", data }
    }
}

/// Query parameters of the consent check endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentCheckQuery {
    /// OAuth client identifier.
    #[serde(default)]
    pub client_id: String,
    /// Requested scope string.
    #[serde(default)]
    pub scope: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Records consent and answers with a freshly issued authorization code.
pub async fn grant_consent_handler(
    State(state): State<ConsentState>,
    SessionUser(user_id): SessionUser,
    headers: HeaderMap,
    payload: Result<Json<GrantConsentRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<String>>, AuthError> {
    let Json(request) = payload?;
    let code = state
        .service
        .grant_and_issue(&user_id, request, request_meta(&headers))
        .await?;
    Ok(Json(ApiResponse::ok(code)))
}

/// Revokes scopes from one of the caller's consent records.
pub async fn revoke_consent_handler(
    State(state): State<ConsentState>,
    SessionUser(user_id): SessionUser,
    payload: Result<Json<RevokeConsentRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<bool>>, AuthError> {
    let Json(request) = payload?;
    let revoked = state.service.revoke(&user_id, request).await?;
    Ok(Json(ApiResponse::ok(revoked)))
}

/// Lists the caller's consent records.
pub async fn list_consents_handler(
    State(state): State<ConsentState>,
    SessionUser(user_id): SessionUser,
) -> Result<Json<ApiResponse<Vec<ConsentRecord>>>, AuthError> {
    let records = state.service.list(&user_id).await?;
    Ok(Json(ApiResponse::ok(records)))
}

/// Decides whether the caller has to consent to a pending request.
pub async fn consent_check_handler(
    State(state): State<ConsentState>,
    SessionUser(user_id): SessionUser,
    query: Result<Query<ConsentCheckQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<ConsentCheck>>, AuthError> {
    let Query(query) = query?;
    if query.client_id.is_empty() {
        return Err(AuthError::invalid_request("clientId is required"));
    }

    let check = state
        .service
        .check(&user_id, &query.client_id, &query.scope)
        .await?;
    Ok(Json(ApiResponse::ok(check)))
}

/// Builds the consent router.
pub fn consent_routes() -> Router<ConsentState> {
    Router::new()
        .route("/api/grant-consent", post(grant_consent_handler))
        .route("/api/revoke-consent", post(revoke_consent_handler))
        .route("/api/consents", get(list_consents_handler))
        .route("/api/consent-check", get(consent_check_handler))
}

fn request_meta(headers: &HeaderMap) -> RequestMeta {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };

    RequestMeta {
        host: header_value(header::HOST),
        accept_language: header_value(header::ACCEPT_LANGUAGE),
    }
}
