//! In-memory application storage.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use scopegate_auth::storage::ApplicationStorage;
use scopegate_auth::types::Application;
use scopegate_auth::{AuthError, AuthResult};

/// Application storage keyed by client id.
#[derive(Debug, Default)]
pub struct InMemoryApplicationStorage {
    applications: DashMap<String, Application>,
}

impl InMemoryApplicationStorage {
    /// Creates an empty application storage.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ApplicationStorage for InMemoryApplicationStorage {
    async fn find_by_client_id(&self, client_id: &str) -> AuthResult<Option<Application>> {
        Ok(self.applications.get(client_id).map(|a| a.value().clone()))
    }

    async fn find_by_id(&self, application_id: &str) -> AuthResult<Option<Application>> {
        Ok(self
            .applications
            .iter()
            .find(|entry| entry.value().id() == application_id)
            .map(|entry| entry.value().clone()))
    }

    async fn create(&self, application: &Application) -> AuthResult<()> {
        application.validate()?;

        let id = application.id();
        if self.find_by_id(&id).await?.is_some() {
            return Err(AuthError::storage(format!("Application {id} already exists")));
        }

        match self.applications.entry(application.client_id.clone()) {
            Entry::Occupied(_) => Err(AuthError::storage(format!(
                "Client id {} is already registered",
                application.client_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(application.clone());
                tracing::debug!(
                    application = %id,
                    client_id = %application.client_id,
                    custom_scopes = application.custom_scopes.len(),
                    "Application registered"
                );
                Ok(())
            }
        }
    }

    async fn list(&self) -> AuthResult<Vec<Application>> {
        let mut applications: Vec<Application> = self
            .applications
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        applications.sort_by_key(Application::id);
        Ok(applications)
    }
}
