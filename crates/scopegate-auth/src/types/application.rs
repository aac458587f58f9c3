//! OAuth application domain types.
//!
//! An application is an OAuth client registration owned by an organization.
//! Its canonical identifier is `owner/name`; the OAuth `client_id` is a
//! separate, opaque value used on the wire.

use serde::{Deserialize, Serialize};

use crate::consent::{CatalogValidationError, ScopeCatalog};

// =============================================================================
// Application
// =============================================================================

/// OAuth application registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Organization that owns the application.
    pub owner: String,

    /// Application name, unique within the owner.
    pub name: String,

    /// Human-readable display name.
    #[serde(default)]
    pub display_name: String,

    /// OAuth client identifier.
    pub client_id: String,

    /// Allowed redirect URIs for the authorization code flow.
    #[serde(default)]
    pub redirect_uris: Vec<String>,

    /// Custom scopes the application declares as consentable.
    #[serde(default)]
    pub custom_scopes: ScopeCatalog,
}

impl Application {
    /// Creates an application with no redirect URIs and no custom scopes.
    #[must_use]
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            owner: owner.into(),
            display_name: name.clone(),
            name,
            client_id: client_id.into(),
            redirect_uris: Vec::new(),
            custom_scopes: ScopeCatalog::default(),
        }
    }

    /// Returns the canonical application identifier (`owner/name`).
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Validates the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the owner, name or client id is empty, if a
    /// redirect URI is not an absolute URL, or if the custom scope catalog is
    /// invalid.
    pub fn validate(&self) -> Result<(), ApplicationValidationError> {
        if self.owner.is_empty() {
            return Err(ApplicationValidationError::EmptyOwner);
        }

        if self.name.is_empty() {
            return Err(ApplicationValidationError::EmptyName);
        }

        if self.client_id.is_empty() {
            return Err(ApplicationValidationError::EmptyClientId);
        }

        for uri in &self.redirect_uris {
            if url::Url::parse(uri).is_err() {
                return Err(ApplicationValidationError::InvalidRedirectUri(uri.clone()));
            }
        }

        self.custom_scopes.validate()?;

        Ok(())
    }

    /// Checks if the given redirect URI is registered for this application.
    #[must_use]
    pub fn is_redirect_uri_allowed(&self, uri: &str) -> bool {
        self.redirect_uris.iter().any(|allowed| allowed == uri)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors raised when an application registration is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicationValidationError {
    /// The owner is empty.
    #[error("Application owner cannot be empty")]
    EmptyOwner,

    /// The name is empty.
    #[error("Application name cannot be empty")]
    EmptyName,

    /// The client id is empty.
    #[error("Application client_id cannot be empty")]
    EmptyClientId,

    /// A registered redirect URI is not an absolute URL.
    #[error("Invalid redirect URI: {0}")]
    InvalidRedirectUri(String),

    /// The custom scope catalog is invalid.
    #[error(transparent)]
    CustomScopes(#[from] CatalogValidationError),
}

impl From<ApplicationValidationError> for crate::error::AuthError {
    fn from(err: ApplicationValidationError) -> Self {
        match err {
            ApplicationValidationError::CustomScopes(inner) => Self::invalid_scope(inner.to_string()),
            other => Self::invalid_request(other.to_string()),
        }
    }
}
