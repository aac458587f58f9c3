//! Error responses for the consent endpoints.
//!
//! Every failure is rendered as the JSON envelope used by the rest of the API:
//!
//! ```json
//! { "status": "error", "msg": "Invalid client_id", "error": "invalid_client" }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::{AuthError, ErrorCategory};

// =============================================================================
// IntoResponse Implementation
// =============================================================================

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        let message = error_message(&self);

        if status.is_server_error() {
            tracing::error!(
                category = %self.category(),
                error_code = self.error_code(),
                error = %self,
                "Consent request failed"
            );
        } else {
            tracing::debug!(
                category = %self.category(),
                error_code = self.error_code(),
                "Consent request rejected: {message}"
            );
        }

        let body = json!({
            "status": "error",
            "msg": message,
            "error": self.error_code(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::invalid_request(rejection.body_text())
    }
}

impl From<QueryRejection> for AuthError {
    fn from(rejection: QueryRejection) -> Self {
        AuthError::invalid_request(rejection.body_text())
    }
}

/// Maps an error to its HTTP status.
fn status_code(error: &AuthError) -> StatusCode {
    match error {
        AuthError::UserNotFound { .. } => StatusCode::NOT_FOUND,
        AuthError::Issuance { .. } => StatusCode::BAD_GATEWAY,
        _ => match error.category() {
            ErrorCategory::Authentication => StatusCode::UNAUTHORIZED,
            ErrorCategory::Validation | ErrorCategory::Referential | ErrorCategory::Issuance => {
                StatusCode::BAD_REQUEST
            }
            ErrorCategory::Persistence | ErrorCategory::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
    }
}

/// Returns the message shown to the caller.
fn error_message(error: &AuthError) -> String {
    match error {
        AuthError::Unauthorized { message }
        | AuthError::InvalidRequest { message }
        | AuthError::InvalidClient { message }
        | AuthError::InvalidApplication { message }
        | AuthError::InvalidScope { message }
        | AuthError::InvalidCodeChallenge { message }
        | AuthError::Issuance { message }
        | AuthError::Storage { message } => message.clone(),
        AuthError::UserNotFound { user_id } => format!("The user: {user_id} doesn't exist"),
        AuthError::UnsupportedResponseType { response_type } => {
            format!("Unsupported response type: {response_type}")
        }
        AuthError::InvalidRedirectUri { redirect_uri } => {
            format!("Redirect URI is not registered: {redirect_uri}")
        }
        // Configuration details stay in the logs.
        AuthError::Configuration { .. } | AuthError::Internal { .. } => {
            "Internal server error".to_string()
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_unauthorized_response() {
        let response = AuthError::unauthorized("Please login first").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["msg"], "Please login first");
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_validation_response() {
        let response =
            AuthError::invalid_request("Application cannot be empty").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["msg"], "Application cannot be empty");
        assert_eq!(body["error"], "invalid_request");
    }

    #[tokio::test]
    async fn test_user_not_found_response() {
        let response = AuthError::user_not_found("built-in/bob").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["msg"], "The user: built-in/bob doesn't exist");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_code(&AuthError::invalid_client("Invalid client_id")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_code(&AuthError::invalid_application("Invalid application")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_code(&AuthError::invalid_redirect_uri("https://evil.example.com")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_code(&AuthError::issuance("code store unavailable")),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_code(&AuthError::storage("database unavailable")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_details_hidden() {
        let response = AuthError::internal("mutex poisoned").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["msg"], "Internal server error");
        assert_eq!(body["error"], "server_error");
    }
}
