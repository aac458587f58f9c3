use scopegate_auth::config::AuthConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Consent and authorization configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Applications and users seeded at start-up
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be > 0".into());
        }
        if self.server.body_limit_bytes == 0 {
            return Err("server.body_limit_bytes must be > 0".into());
        }

        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(format!("logging.level must be one of {valid_levels:?}"));
        }

        self.auth.validate().map_err(|e| format!("auth: {e}"))?;
        self.bootstrap.validate()?;

        Ok(())
    }

    pub fn addr(&self) -> SocketAddr {
        use std::net::{IpAddr, Ipv4Addr};
        let host: IpAddr = self
            .server
            .host
            .parse()
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));
        SocketAddr::from((host, self.server.port))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8000
}
fn default_body_limit() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}
fn default_log_level() -> String {
    "info".into()
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Data seeded into the in-memory stores at start-up.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub applications: Vec<BootstrapApplication>,
    #[serde(default)]
    pub users: Vec<BootstrapUser>,
}

impl BootstrapConfig {
    /// Checks every seeded application and rejects duplicate users.
    pub fn validate(&self) -> Result<(), String> {
        for app in &self.applications {
            app.to_application()
                .validate()
                .map_err(|e| format!("bootstrap application {}/{}: {e}", app.owner, app.name))?;
        }

        let mut seen = std::collections::HashSet::new();
        for user in &self.users {
            if user.owner.is_empty() || user.name.is_empty() {
                return Err("bootstrap users require owner and name".into());
            }
            if !seen.insert((user.owner.as_str(), user.name.as_str())) {
                return Err(format!(
                    "bootstrap user {}/{} is listed twice",
                    user.owner, user.name
                ));
            }
        }

        Ok(())
    }
}

/// An application registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapApplication {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub client_id: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    /// Custom scopes the application declares as consentable
    #[serde(default)]
    pub custom_scopes: Vec<BootstrapScope>,
}

impl BootstrapApplication {
    pub fn to_application(&self) -> scopegate_auth::Application {
        let mut app =
            scopegate_auth::Application::new(&self.owner, &self.name, &self.client_id);
        if !self.display_name.is_empty() {
            app.display_name = self.display_name.clone();
        }
        app.redirect_uris = self.redirect_uris.clone();
        app.custom_scopes = self
            .custom_scopes
            .iter()
            .map(|s| {
                scopegate_auth::ScopeDescription::new(&s.scope, &s.display_name, &s.description)
            })
            .collect::<Vec<_>>()
            .into();
        app
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapScope {
    pub scope: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
}

/// A user account. Login is handled outside this server; seeded users only
/// need to exist so consent can be recorded for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapUser {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Open a login session at start-up and log its token. Development only.
    #[serde(default)]
    pub login_session: bool,
}

impl BootstrapUser {
    pub fn to_user(&self) -> scopegate_auth::User {
        let mut user = scopegate_auth::User::new(&self.owner, &self.name);
        if let Some(display_name) = &self.display_name {
            user.display_name = display_name.clone();
        }
        user.email = self.email.clone();
        user
    }
}

pub mod loader {
    use super::AppConfig;
    use config::{Config, Environment, File};
    use std::path::{Path, PathBuf};

    pub fn load_config(path: Option<&str>) -> Result<AppConfig, String> {
        let mut builder = Config::builder();
        let pathbuf = PathBuf::from(path.unwrap_or("scopegate.toml"));
        if pathbuf.exists() {
            builder = builder.add_source(File::from(pathbuf));
        } else if path.is_some() {
            return Err(format!("config file not found: {}", pathbuf.display()));
        }
        // Environment variable overrides, e.g., SCOPEGATE__SERVER__PORT=9090
        builder = builder.add_source(
            Environment::with_prefix("SCOPEGATE")
                .prefix_separator("__")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| format!("config build error: {e}"))?;
        let merged: AppConfig = cfg
            .try_deserialize()
            .map_err(|e| format!("config deserialize error: {e}"))?;
        merged.validate()?;
        Ok(merged)
    }

    pub fn load_config_with_default_path<P: AsRef<Path>>(
        path: Option<P>,
    ) -> Result<AppConfig, String> {
        let p = path
            .as_ref()
            .map(|p| p.as_ref().to_string_lossy().to_string());
        load_config(p.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs_app() -> BootstrapApplication {
        BootstrapApplication {
            owner: "admin".into(),
            name: "app-docs".into(),
            display_name: String::new(),
            client_id: "docs-client".into(),
            redirect_uris: vec!["https://docs.example.com/callback".into()],
            custom_scopes: vec![BootstrapScope {
                scope: "read".into(),
                display_name: "Read".into(),
                description: String::new(),
            }],
        }
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = AppConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.addr().port(), 8000);
    }

    #[test]
    fn invalid_log_level_rejected() {
        let mut cfg = AppConfig::default();
        cfg.logging.level = "verbose".into();
        assert!(cfg.validate().unwrap_err().contains("logging.level"));
    }

    #[test]
    fn bootstrap_application_converts() {
        let app = docs_app().to_application();
        assert_eq!(app.id(), "admin/app-docs");
        assert_eq!(app.display_name, "app-docs");
        assert!(app.custom_scopes.contains("read"));
    }

    #[test]
    fn bootstrap_rejects_invalid_catalog() {
        let mut app = docs_app();
        app.custom_scopes.push(BootstrapScope {
            scope: "read".into(),
            display_name: String::new(),
            description: String::new(),
        });
        let cfg = BootstrapConfig {
            applications: vec![app],
            users: vec![],
        };
        assert!(cfg.validate().unwrap_err().contains("admin/app-docs"));
    }

    #[test]
    fn bootstrap_rejects_duplicate_users() {
        let user = BootstrapUser {
            owner: "built-in".into(),
            name: "alice".into(),
            display_name: None,
            email: None,
            login_session: false,
        };
        let cfg = BootstrapConfig {
            applications: vec![],
            users: vec![user.clone(), user],
        };
        assert!(cfg.validate().unwrap_err().contains("listed twice"));
    }
}
