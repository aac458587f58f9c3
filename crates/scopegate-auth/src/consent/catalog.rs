//! Custom scope catalog declared by an application.
//!
//! Only scopes listed in an application's catalog take part in consent
//! decisions. Standard scopes such as `openid` or `profile` are outside the
//! catalog and are ignored by the consent policy.

use serde::{Deserialize, Serialize};

use super::scope_set::ScopeSet;

/// Description shown to the user for scopes the application did not declare.
pub const UNDECLARED_SCOPE_DESCRIPTION: &str = "This scope is not defined in the application";

/// A human-readable description of an OAuth scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeDescription {
    /// The scope identifier as it appears in the `scope` parameter.
    pub scope: String,

    /// Display name for the consent screen.
    #[serde(default)]
    pub display_name: String,

    /// Longer description for the consent screen.
    #[serde(default)]
    pub description: String,
}

impl ScopeDescription {
    /// Creates a description with the given scope, display name and text.
    #[must_use]
    pub fn new(
        scope: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            scope: scope.into(),
            display_name: display_name.into(),
            description: description.into(),
        }
    }
}

/// Errors raised when an application's scope catalog is misconfigured.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogValidationError {
    /// A catalog entry has a blank scope name.
    #[error("Missing parameter: custom scope name (entry {index})")]
    EmptyScope {
        /// Position of the offending entry.
        index: usize,
    },

    /// The same scope is declared twice.
    #[error("Duplicate custom scope: {scope}")]
    DuplicateScope {
        /// The repeated scope name.
        scope: String,
    },
}

/// The set of consentable scopes declared by an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeCatalog(Vec<ScopeDescription>);

impl ScopeCatalog {
    /// Creates a catalog from scope descriptions.
    #[must_use]
    pub fn new(scopes: Vec<ScopeDescription>) -> Self {
        Self(scopes)
    }

    /// Validates the catalog at application configuration time.
    ///
    /// # Errors
    ///
    /// Returns an error if any scope name is blank after trimming or if a
    /// scope name is declared more than once.
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        let mut seen = ScopeSet::new();
        for (index, entry) in self.0.iter().enumerate() {
            if entry.scope.trim().is_empty() {
                return Err(CatalogValidationError::EmptyScope { index });
            }
            if !seen.insert(entry.scope.as_str()) {
                return Err(CatalogValidationError::DuplicateScope {
                    scope: entry.scope.clone(),
                });
            }
        }
        Ok(())
    }

    /// Returns `true` if the application declares no custom scopes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of declared scopes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the scope is declared in this catalog.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.get(scope).is_some()
    }

    /// Looks up the catalog entry for a scope.
    #[must_use]
    pub fn get(&self, scope: &str) -> Option<&ScopeDescription> {
        if scope.is_empty() {
            return None;
        }
        self.0.iter().find(|entry| entry.scope == scope)
    }

    /// Keeps only the requested scopes that this catalog declares.
    #[must_use]
    pub fn filter(&self, requested: &ScopeSet) -> ScopeSet {
        requested.retain_known(self)
    }

    /// Builds consent screen descriptions for the requested scopes.
    ///
    /// Declared scopes use their catalog entry, with the scope id standing in
    /// for a blank display name. Undeclared scopes get a placeholder entry.
    #[must_use]
    pub fn describe(&self, requested: &ScopeSet) -> Vec<ScopeDescription> {
        requested
            .iter()
            .map(|scope| match self.get(scope) {
                Some(entry) => {
                    let display_name = if entry.display_name.is_empty() {
                        entry.scope.clone()
                    } else {
                        entry.display_name.clone()
                    };
                    ScopeDescription::new(&entry.scope, display_name, &entry.description)
                }
                None => ScopeDescription::new(scope, scope, UNDECLARED_SCOPE_DESCRIPTION),
            })
            .collect()
    }

    /// Iterates over the catalog entries.
    pub fn iter(&self) -> impl Iterator<Item = &ScopeDescription> {
        self.0.iter()
    }
}

impl From<Vec<ScopeDescription>> for ScopeCatalog {
    fn from(scopes: Vec<ScopeDescription>) -> Self {
        Self(scopes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> ScopeCatalog {
        ScopeCatalog::new(vec![
            ScopeDescription::new("read", "Read", "Read your documents"),
            ScopeDescription::new("write", "", "Modify your documents"),
        ])
    }

    #[test]
    fn test_validate_ok() {
        assert!(catalog().validate().is_ok());
        assert!(ScopeCatalog::default().validate().is_ok());
    }

    #[test]
    fn test_validate_blank_scope() {
        let catalog = ScopeCatalog::new(vec![
            ScopeDescription::new("read", "Read", ""),
            ScopeDescription::new("   ", "Blank", ""),
        ]);
        assert_eq!(
            catalog.validate(),
            Err(CatalogValidationError::EmptyScope { index: 1 })
        );
    }

    #[test]
    fn test_validate_duplicate_scope() {
        let catalog = ScopeCatalog::new(vec![
            ScopeDescription::new("read", "Read", ""),
            ScopeDescription::new("read", "Read again", ""),
        ]);
        assert_eq!(
            catalog.validate(),
            Err(CatalogValidationError::DuplicateScope {
                scope: "read".to_string()
            })
        );
    }

    #[test]
    fn test_filter_drops_unknown_scopes() {
        let requested = ScopeSet::parse("openid write unknown read");
        let valid = catalog().filter(&requested);
        assert_eq!(valid.to_vec(), vec!["write", "read"]);
    }

    #[test]
    fn test_describe() {
        let described = catalog().describe(&ScopeSet::parse("read write email"));
        assert_eq!(described.len(), 3);
        assert_eq!(described[0].display_name, "Read");
        assert_eq!(described[1].display_name, "write");
        assert_eq!(described[1].description, "Modify your documents");
        assert_eq!(described[2].display_name, "email");
        assert_eq!(described[2].description, UNDECLARED_SCOPE_DESCRIPTION);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"[{"scope": "read", "displayName": "Read access"}]"#;
        let catalog: ScopeCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("read").unwrap().display_name, "Read access");
        assert_eq!(catalog.get("read").unwrap().description, "");
    }
}
