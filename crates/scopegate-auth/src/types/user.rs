//! User domain type.
//!
//! The user entity owns its consent ledger (`applicationScopes`). Only the
//! consent service rewrites that field.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::consent::ConsentLedger;

/// Default datetime value for deserialization when field is missing.
fn default_datetime() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

// =============================================================================
// User Type
// =============================================================================

/// A user that can authorize applications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Organization the user belongs to.
    pub owner: String,

    /// Username, unique within the owner.
    pub name: String,

    /// Display name.
    #[serde(default)]
    pub display_name: String,

    /// Email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Scopes the user has granted, per application.
    #[serde(default)]
    pub application_scopes: ConsentLedger,

    /// When the user was created.
    #[serde(default = "default_datetime", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,

    /// When the user was last updated.
    #[serde(default = "default_datetime", with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl User {
    /// Creates a new user with an empty consent ledger.
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        let name = name.into();
        Self {
            owner: owner.into(),
            display_name: name.clone(),
            name,
            email: None,
            application_scopes: ConsentLedger::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the user identifier (`owner/name`).
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Copies the listed fields from `source` into `self`.
    ///
    /// An empty field list copies every mutable field.
    pub fn apply_fields(&mut self, source: &User, fields: &[UserField]) {
        let all = fields.is_empty();
        if all || fields.contains(&UserField::DisplayName) {
            self.display_name = source.display_name.clone();
        }
        if all || fields.contains(&UserField::Email) {
            self.email = source.email.clone();
        }
        if all || fields.contains(&UserField::ApplicationScopes) {
            self.application_scopes = source.application_scopes.clone();
        }
        self.updated_at = OffsetDateTime::now_utc();
    }
}

/// User fields that can be written selectively by [`crate::storage::UserStorage::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    /// The display name.
    DisplayName,
    /// The email address.
    Email,
    /// The consent ledger.
    ApplicationScopes,
}

impl UserField {
    /// Returns the persisted column name of the field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DisplayName => "display_name",
            Self::Email => "email",
            Self::ApplicationScopes => "application_scopes",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_new() {
        let user = User::new("built-in", "alice");
        assert_eq!(user.id(), "built-in/alice");
        assert_eq!(user.display_name, "alice");
        assert!(user.application_scopes.is_empty());
    }

    #[test]
    fn test_apply_only_listed_fields() {
        let mut stored = User::new("built-in", "alice");
        let mut changed = stored.clone();
        changed.display_name = "Alice".to_string();
        changed.application_scopes.grant("admin/app", ["read"]);

        stored.apply_fields(&changed, &[UserField::ApplicationScopes]);

        assert_eq!(stored.display_name, "alice");
        assert!(stored.application_scopes.get("admin/app").is_some());
    }

    #[test]
    fn test_apply_all_fields() {
        let mut stored = User::new("built-in", "alice");
        let mut changed = stored.clone();
        changed.display_name = "Alice".to_string();
        changed.email = Some("alice@example.com".to_string());

        stored.apply_fields(&changed, &[]);

        assert_eq!(stored.display_name, "Alice");
        assert_eq!(stored.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_user_deserialization() {
        let json = r#"{
            "owner": "built-in",
            "name": "alice",
            "applicationScopes": [
                {"application": "admin/app", "grantedScopes": ["read", "write"]}
            ]
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id(), "built-in/alice");
        assert_eq!(
            user.application_scopes.get("admin/app").unwrap().to_vec(),
            vec!["read", "write"]
        );
    }

    #[test]
    fn test_user_field_names() {
        assert_eq!(UserField::ApplicationScopes.as_str(), "application_scopes");
    }
}
