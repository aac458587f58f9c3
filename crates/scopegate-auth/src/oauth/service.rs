//! OAuth authorization code service.
//!
//! This module provides the default [`CodeIssuer`]. It validates the
//! authorization parameters that remain after consent and persists an
//! [`AuthorizationSession`] for the new code.
//!
//! # Security Requirements
//!
//! - Only the `code` response type is supported
//! - The redirect URI must exactly match a registered URI
//! - A PKCE challenge, when present, must be 43-128 unreserved characters
//! - Authorization codes are 256-bit random values
//!
//! # Usage
//!
//! ```ignore
//! use scopegate_auth::oauth::{AuthorizationConfig, AuthorizationService};
//!
//! let service = AuthorizationService::new(
//!     application_storage,
//!     session_storage,
//!     AuthorizationConfig::default(),
//! );
//!
//! let code = service.issue(&request).await?;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::code::{AuthorizationCode, CodeIssuer, CodeRequest};
use super::session::{AuthorizationSession, non_empty};
use crate::AuthResult;
use crate::error::AuthError;
use crate::storage::{ApplicationStorage, SessionStorage};

/// Minimum PKCE code challenge length (RFC 7636).
const MIN_CHALLENGE_LEN: usize = 43;

/// Maximum PKCE code challenge length (RFC 7636).
const MAX_CHALLENGE_LEN: usize = 128;

/// Authorization service that issues codes for consented requests.
pub struct AuthorizationService {
    /// Application storage for looking up registered clients.
    application_storage: Arc<dyn ApplicationStorage>,

    /// Session storage for persisting issued codes.
    session_storage: Arc<dyn SessionStorage>,

    /// Service configuration.
    config: AuthorizationConfig,
}

/// Configuration for the authorization service.
#[derive(Debug, Clone)]
pub struct AuthorizationConfig {
    /// Authorization code lifetime.
    /// Default: 10 minutes.
    pub code_lifetime: Duration,
}

impl Default for AuthorizationConfig {
    fn default() -> Self {
        Self {
            code_lifetime: Duration::minutes(10),
        }
    }
}

impl AuthorizationConfig {
    /// Creates a new configuration with custom code lifetime.
    #[must_use]
    pub fn with_code_lifetime(mut self, lifetime: Duration) -> Self {
        self.code_lifetime = lifetime;
        self
    }
}

impl AuthorizationService {
    /// Creates a new authorization service.
    #[must_use]
    pub fn new(
        application_storage: Arc<dyn ApplicationStorage>,
        session_storage: Arc<dyn SessionStorage>,
        config: AuthorizationConfig,
    ) -> Self {
        Self {
            application_storage,
            session_storage,
            config,
        }
    }

    /// Returns the service configuration.
    #[must_use]
    pub fn config(&self) -> &AuthorizationConfig {
        &self.config
    }
}

#[async_trait]
impl CodeIssuer for AuthorizationService {
    /// Issues an authorization code.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `response_type` is not "code" (`UnsupportedResponseType`)
    /// - Client is not found (`InvalidClient`)
    /// - Redirect URI is not registered (`InvalidRedirectUri`)
    /// - PKCE challenge is malformed (`InvalidCodeChallenge`)
    /// - The session cannot be stored (`Storage`)
    ///
    /// # Security
    ///
    /// Never log the authorization code or state parameter.
    async fn issue(&self, request: &CodeRequest) -> AuthResult<AuthorizationCode> {
        // 1. Validate response_type
        if request.response_type != "code" {
            return Err(AuthError::unsupported_response_type(&request.response_type));
        }

        // 2. Validate client
        let application = self
            .application_storage
            .find_by_client_id(&request.client_id)
            .await?
            .ok_or_else(|| AuthError::invalid_client("Invalid client_id"))?;

        // 3. Validate redirect_uri
        if !application.is_redirect_uri_allowed(&request.redirect_uri) {
            return Err(AuthError::invalid_redirect_uri(&request.redirect_uri));
        }

        // 4. Validate PKCE challenge shape
        validate_code_challenge(&request.challenge)?;

        // 5. Create and persist the session
        let now = OffsetDateTime::now_utc();
        let session = AuthorizationSession {
            id: Uuid::new_v4(),
            code: AuthorizationSession::generate_code(),
            client_id: request.client_id.clone(),
            application: application.id(),
            user_id: request.user_id.clone(),
            redirect_uri: request.redirect_uri.clone(),
            scope: request.scope.clone(),
            state: request.state.clone(),
            nonce: non_empty(&request.nonce),
            code_challenge: non_empty(&request.challenge),
            resource: non_empty(&request.resource),
            created_at: now,
            expires_at: now + self.config.code_lifetime,
        };

        self.session_storage.create(&session).await?;

        tracing::info!(
            client_id = %request.client_id,
            user_id = %request.user_id,
            host = %request.host,
            session_id = %session.id,
            "Authorization code issued"
        );

        Ok(AuthorizationCode { code: session.code })
    }
}

/// Validates a PKCE code challenge (RFC 7636 section 4.2).
///
/// An empty challenge is accepted; enforcing PKCE per client is left to the
/// token endpoint.
fn validate_code_challenge(challenge: &str) -> AuthResult<()> {
    if challenge.is_empty() {
        return Ok(());
    }

    let len = challenge.len();
    if !(MIN_CHALLENGE_LEN..=MAX_CHALLENGE_LEN).contains(&len) {
        return Err(AuthError::invalid_code_challenge(format!(
            "code challenge must be {MIN_CHALLENGE_LEN}-{MAX_CHALLENGE_LEN} characters, got {len}"
        )));
    }

    let unreserved = |c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~');
    if !challenge.chars().all(unreserved) {
        return Err(AuthError::invalid_code_challenge(
            "code challenge contains invalid characters",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Application;
    use std::collections::HashMap;
    use std::sync::RwLock;

    /// Mock application storage for testing.
    struct MockApplicationStorage {
        applications: RwLock<HashMap<String, Application>>,
    }

    impl MockApplicationStorage {
        fn new() -> Self {
            Self {
                applications: RwLock::new(HashMap::new()),
            }
        }

        fn add_application(&self, application: Application) {
            self.applications
                .write()
                .unwrap()
                .insert(application.client_id.clone(), application);
        }
    }

    #[async_trait]
    impl ApplicationStorage for MockApplicationStorage {
        async fn find_by_client_id(&self, client_id: &str) -> AuthResult<Option<Application>> {
            Ok(self.applications.read().unwrap().get(client_id).cloned())
        }

        async fn find_by_id(&self, application_id: &str) -> AuthResult<Option<Application>> {
            Ok(self
                .applications
                .read()
                .unwrap()
                .values()
                .find(|a| a.id() == application_id)
                .cloned())
        }

        async fn create(&self, application: &Application) -> AuthResult<()> {
            self.add_application(application.clone());
            Ok(())
        }

        async fn list(&self) -> AuthResult<Vec<Application>> {
            Ok(self.applications.read().unwrap().values().cloned().collect())
        }
    }

    /// Mock session storage for testing.
    struct MockSessionStorage {
        sessions: RwLock<HashMap<String, AuthorizationSession>>,
    }

    impl MockSessionStorage {
        fn new() -> Self {
            Self {
                sessions: RwLock::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl SessionStorage for MockSessionStorage {
        async fn create(&self, session: &AuthorizationSession) -> AuthResult<()> {
            self.sessions
                .write()
                .unwrap()
                .insert(session.code.clone(), session.clone());
            Ok(())
        }

        async fn find_by_code(&self, code: &str) -> AuthResult<Option<AuthorizationSession>> {
            Ok(self.sessions.read().unwrap().get(code).cloned())
        }

        async fn cleanup_expired(&self) -> AuthResult<u64> {
            let mut sessions = self.sessions.write().unwrap();
            let before = sessions.len();
            sessions.retain(|_, s| !s.is_expired());
            Ok((before - sessions.len()) as u64)
        }
    }

    fn create_test_application() -> Application {
        let mut app = Application::new("admin", "app-docs", "docs-client");
        app.redirect_uris = vec!["https://docs.example.com/callback".to_string()];
        app
    }

    fn create_test_request() -> CodeRequest {
        CodeRequest {
            user_id: "built-in/alice".to_string(),
            client_id: "docs-client".to_string(),
            response_type: "code".to_string(),
            redirect_uri: "https://docs.example.com/callback".to_string(),
            scope: "openid read".to_string(),
            state: "xyz".to_string(),
            challenge: "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM".to_string(),
            host: "auth.example.com".to_string(),
            ..CodeRequest::default()
        }
    }

    fn create_service() -> (AuthorizationService, Arc<MockSessionStorage>) {
        let application_storage = Arc::new(MockApplicationStorage::new());
        application_storage.add_application(create_test_application());
        let session_storage = Arc::new(MockSessionStorage::new());

        let service = AuthorizationService::new(
            application_storage,
            session_storage.clone(),
            AuthorizationConfig::default(),
        );

        (service, session_storage)
    }

    #[tokio::test]
    async fn test_issue_success() {
        let (service, session_storage) = create_service();

        let code = service.issue(&create_test_request()).await.unwrap();
        assert_eq!(code.code.len(), 43);

        let stored = session_storage
            .find_by_code(&code.code)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.application, "admin/app-docs");
        assert_eq!(stored.user_id, "built-in/alice");
        assert_eq!(stored.scope, "openid read");
        assert!(stored.nonce.is_none());
        assert!(stored.code_challenge.is_some());
        assert!(!stored.is_expired());
    }

    #[tokio::test]
    async fn test_issue_unsupported_response_type() {
        let (service, _) = create_service();
        let mut request = create_test_request();
        request.response_type = "token".to_string();

        let err = service.issue(&request).await.unwrap_err();
        assert!(matches!(err, AuthError::UnsupportedResponseType { .. }));
    }

    #[tokio::test]
    async fn test_issue_unknown_client() {
        let (service, _) = create_service();
        let mut request = create_test_request();
        request.client_id = "unknown".to_string();

        let err = service.issue(&request).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidClient { .. }));
    }

    #[tokio::test]
    async fn test_issue_unregistered_redirect_uri() {
        let (service, session_storage) = create_service();
        let mut request = create_test_request();
        request.redirect_uri = "https://evil.example.com/callback".to_string();

        let err = service.issue(&request).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidRedirectUri { .. }));
        assert_eq!(session_storage.sessions.read().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_issue_without_challenge() {
        let (service, _) = create_service();
        let mut request = create_test_request();
        request.challenge = String::new();

        assert!(service.issue(&request).await.is_ok());
    }

    #[test]
    fn test_validate_code_challenge() {
        assert!(validate_code_challenge("").is_ok());
        assert!(validate_code_challenge(&"a".repeat(43)).is_ok());
        assert!(validate_code_challenge(&"a".repeat(128)).is_ok());
        assert!(validate_code_challenge(&"a".repeat(42)).is_err());
        assert!(validate_code_challenge(&"a".repeat(129)).is_err());
        assert!(validate_code_challenge(&format!("{}+", "a".repeat(42))).is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = AuthorizationConfig::default().with_code_lifetime(Duration::minutes(2));
        assert_eq!(config.code_lifetime, Duration::minutes(2));
    }
}
