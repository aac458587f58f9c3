//! Insertion-ordered scope sets.
//!
//! Scopes are semantically a set, but every wire format in the consent flow
//! carries them as an ordered array. `ScopeSet` keeps both views: membership
//! checks are O(1) and iteration follows first-insertion order.

use std::fmt;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::catalog::ScopeCatalog;

/// An ordered set of scope identifiers.
///
/// Serializes as a JSON array in first-insertion order. Deserializing an
/// array with duplicates keeps the first occurrence of each scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ScopeSet {
    scopes: IndexSet<String>,
}

impl ScopeSet {
    /// Creates an empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a space-separated OAuth `scope` parameter.
    ///
    /// The string is split on single spaces, each token is trimmed and empty
    /// tokens are dropped. Repeated tokens keep their first position.
    ///
    /// # Example
    ///
    /// ```
    /// use scopegate_auth::consent::ScopeSet;
    ///
    /// let scopes = ScopeSet::parse("openid  read write read");
    /// assert_eq!(scopes.to_scope_string(), "openid read write");
    /// ```
    #[must_use]
    pub fn parse(scope: &str) -> Self {
        scope
            .split(' ')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Returns the number of scopes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Returns `true` if the set holds no scopes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns `true` if the set contains the given scope.
    #[must_use]
    pub fn contains(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Inserts a scope at the end of the set.
    ///
    /// Returns `false` if the scope was already present; its position is
    /// left unchanged in that case.
    pub fn insert(&mut self, scope: impl Into<String>) -> bool {
        self.scopes.insert(scope.into())
    }

    /// Appends every scope not already present, in input order.
    ///
    /// Returns the number of newly added scopes.
    pub fn extend_from<I, S>(&mut self, scopes: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for scope in scopes {
            if self.insert(scope) {
                added += 1;
            }
        }
        added
    }

    /// Removes every scope that appears in `scopes`.
    ///
    /// The relative order of the remaining scopes is preserved. Returns the
    /// number of scopes removed.
    pub fn remove_all<'a, I>(&mut self, scopes: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let revoke: IndexSet<&str> = scopes.into_iter().collect();
        let before = self.scopes.len();
        self.scopes.retain(|scope| !revoke.contains(scope.as_str()));
        before - self.scopes.len()
    }

    /// Returns `true` if every scope of `self` is present in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &ScopeSet) -> bool {
        self.scopes.is_subset(&other.scopes)
    }

    /// Returns the scopes of `self` that are declared in the catalog,
    /// keeping the original order.
    #[must_use]
    pub fn retain_known(&self, catalog: &ScopeCatalog) -> ScopeSet {
        self.iter()
            .filter(|scope| catalog.contains(scope))
            .map(str::to_string)
            .collect()
    }

    /// Iterates over the scopes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    /// Joins the scopes with single spaces, the OAuth `scope` wire format.
    #[must_use]
    pub fn to_scope_string(&self) -> String {
        self.iter().collect::<Vec<_>>().join(" ")
    }

    /// Returns the scopes as an ordered vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.scopes.iter().cloned().collect()
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_scope_string())
    }
}

impl<S: Into<String>> FromIterator<S> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            scopes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<String>> for ScopeSet {
    fn from(scopes: Vec<String>) -> Self {
        scopes.into_iter().collect()
    }
}

impl From<ScopeSet> for Vec<String> {
    fn from(set: ScopeSet) -> Self {
        set.scopes.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a ScopeSet {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.scopes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_and_trims() {
        let scopes = ScopeSet::parse("openid profile read");
        assert_eq!(scopes.to_vec(), vec!["openid", "profile", "read"]);
    }

    #[test]
    fn test_parse_drops_empty_tokens() {
        let scopes = ScopeSet::parse("  read   write ");
        assert_eq!(scopes.to_vec(), vec!["read", "write"]);
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(ScopeSet::parse("").is_empty());
        assert!(ScopeSet::parse("   ").is_empty());
    }

    #[test]
    fn test_parse_deduplicates() {
        let scopes = ScopeSet::parse("write read write");
        assert_eq!(scopes.to_vec(), vec!["write", "read"]);
    }

    #[test]
    fn test_parse_tab_is_trimmed_only_at_edges() {
        // only single spaces separate tokens; surrounding whitespace is trimmed
        let scopes = ScopeSet::parse("\tread\t write");
        assert_eq!(scopes.to_vec(), vec!["read", "write"]);
    }

    #[test]
    fn test_extend_from_appends_new_in_order() {
        let mut scopes = ScopeSet::from(vec!["a".to_string(), "b".to_string()]);
        let added = scopes.extend_from(["c", "a", "d", "c"]);
        assert_eq!(added, 2);
        assert_eq!(scopes.to_vec(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_remove_all_is_stable() {
        let mut scopes: ScopeSet = ["a", "b", "c", "d"].into_iter().collect();
        let removed = scopes.remove_all(["c", "a", "zzz"]);
        assert_eq!(removed, 2);
        assert_eq!(scopes.to_vec(), vec!["b", "d"]);
    }

    #[test]
    fn test_is_subset_of() {
        let granted: ScopeSet = ["read", "write"].into_iter().collect();
        let read: ScopeSet = ["read"].into_iter().collect();
        let read_admin: ScopeSet = ["read", "admin"].into_iter().collect();

        assert!(read.is_subset_of(&granted));
        assert!(!read_admin.is_subset_of(&granted));
        assert!(ScopeSet::new().is_subset_of(&granted));
    }

    #[test]
    fn test_serde_roundtrip_keeps_order() {
        let scopes: ScopeSet = serde_json::from_str(r#"["write","read","write"]"#).unwrap();
        assert_eq!(scopes.to_vec(), vec!["write", "read"]);
        assert_eq!(serde_json::to_string(&scopes).unwrap(), r#"["write","read"]"#);
    }

    #[test]
    fn test_display() {
        let scopes: ScopeSet = ["openid", "read"].into_iter().collect();
        assert_eq!(scopes.to_string(), "openid read");
    }
}
