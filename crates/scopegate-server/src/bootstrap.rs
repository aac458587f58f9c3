//! Bootstrap module for seeding applications and users.
//!
//! The in-memory stores start empty; applications and users listed under
//! `[bootstrap]` in the configuration are registered before the server starts
//! accepting requests. Users marked with `login_session = true` also get a
//! login session whose token is logged, so the consent endpoints can be
//! called without a separate login service.

use scopegate_auth::storage::{ApplicationStorage, LoginSessionStorage, UserStorage};
use scopegate_auth::{AuthError, AuthResult};
use scopegate_db_memory::InMemoryBackend;
use tracing::{info, warn};

use crate::config::BootstrapConfig;

/// Seeds the configured applications and users.
///
/// Users that already exist are not created again, but still get the
/// requested login session.
///
/// # Errors
///
/// Returns an error if an application fails validation or is registered
/// twice.
pub async fn bootstrap_data(
    config: &BootstrapConfig,
    backend: &InMemoryBackend,
) -> AuthResult<BootstrapStats> {
    let mut stats = BootstrapStats::default();

    for entry in &config.applications {
        let application = entry.to_application();
        backend.applications.create(&application).await?;
        info!(
            application = %application.id(),
            client_id = %application.client_id,
            custom_scopes = application.custom_scopes.len(),
            "Bootstrapped application"
        );
        stats.applications += 1;
    }

    for entry in &config.users {
        let user = entry.to_user();
        let user_id = user.id();
        if backend.users.find_by_id(&user_id).await?.is_some() {
            warn!(user_id = %user_id, "Bootstrap user already exists, skipping");
        } else {
            match backend.users.create(&user).await {
                Ok(()) => stats.users += 1,
                Err(AuthError::Storage { message }) => {
                    warn!(user_id = %user_id, error = %message, "Bootstrap user not created");
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        if entry.login_session {
            let token = backend.login_sessions.create(&user_id).await?;
            warn!(
                user_id = %user_id,
                token = %token,
                "Bootstrapped login session; send it as `Authorization: Session <token>`"
            );
            stats.login_sessions += 1;
        }
    }

    info!(
        applications = stats.applications,
        users = stats.users,
        login_sessions = stats.login_sessions,
        "Bootstrap complete"
    );
    Ok(stats)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapStats {
    pub applications: usize,
    pub users: usize,
    pub login_sessions: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BootstrapApplication, BootstrapScope, BootstrapUser};

    fn config() -> BootstrapConfig {
        BootstrapConfig {
            applications: vec![BootstrapApplication {
                owner: "admin".into(),
                name: "app-docs".into(),
                display_name: "Docs".into(),
                client_id: "docs-client".into(),
                redirect_uris: vec!["https://docs.example.com/callback".into()],
                custom_scopes: vec![BootstrapScope {
                    scope: "read".into(),
                    display_name: "Read".into(),
                    description: "Read your documents".into(),
                }],
            }],
            users: vec![BootstrapUser {
                owner: "built-in".into(),
                name: "alice".into(),
                display_name: Some("Alice".into()),
                email: None,
                login_session: false,
            }],
        }
    }

    #[tokio::test]
    async fn seeds_applications_and_users() {
        let backend = InMemoryBackend::new(time::Duration::hours(1));
        let stats = bootstrap_data(&config(), &backend).await.unwrap();
        assert_eq!(
            stats,
            BootstrapStats {
                applications: 1,
                users: 1,
                login_sessions: 0,
            }
        );

        let app = backend
            .applications
            .find_by_client_id("docs-client")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(app.display_name, "Docs");

        let user = backend.users.find_by_id("built-in/alice").await.unwrap().unwrap();
        assert_eq!(user.display_name, "Alice");
        assert!(user.application_scopes.is_empty());
    }

    #[tokio::test]
    async fn existing_users_are_skipped() {
        let backend = InMemoryBackend::new(time::Duration::hours(1));
        backend
            .users
            .create(&scopegate_auth::User::new("built-in", "alice"))
            .await
            .unwrap();

        let stats = bootstrap_data(&config(), &backend).await.unwrap();
        assert_eq!(stats.users, 0);
    }

    #[tokio::test]
    async fn login_session_is_seeded_on_request() {
        let backend = InMemoryBackend::new(time::Duration::hours(1));
        let mut config = config();
        config.users[0].login_session = true;

        let stats = bootstrap_data(&config, &backend).await.unwrap();
        assert_eq!(stats.login_sessions, 1);
        assert_eq!(backend.login_sessions.len(), 1);
    }

    #[tokio::test]
    async fn existing_user_still_gets_login_session() {
        let backend = InMemoryBackend::new(time::Duration::hours(1));
        backend
            .users
            .create(&scopegate_auth::User::new("built-in", "alice"))
            .await
            .unwrap();
        let mut config = config();
        config.users[0].login_session = true;

        let stats = bootstrap_data(&config, &backend).await.unwrap();
        assert_eq!(stats.users, 0);
        assert_eq!(stats.login_sessions, 1);
    }

    #[tokio::test]
    async fn no_login_sessions_by_default() {
        let backend = InMemoryBackend::new(time::Duration::hours(1));
        bootstrap_data(&config(), &backend).await.unwrap();
        assert!(backend.login_sessions.is_empty());
    }
}
