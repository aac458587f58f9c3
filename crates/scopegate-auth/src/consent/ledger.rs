//! Per-user consent ledger.
//!
//! The ledger records, for each application, the scopes a user has approved.
//! It is embedded in the user entity as the `applicationScopes` field and is
//! always read and written as a whole.
//!
//! # Invariants
//!
//! - At most one record per application.
//! - No record has an empty scope set; revoking the last scope deletes it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::scope_set::ScopeSet;
use crate::AuthResult;
use crate::error::AuthError;

/// One entry of a user's ledger, as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRecord {
    /// Application identifier (`owner/name`).
    pub application: String,

    /// Scopes the user approved for the application.
    #[serde(default)]
    pub granted_scopes: ScopeSet,
}

impl ConsentRecord {
    /// Creates a new consent record.
    #[must_use]
    pub fn new(application: impl Into<String>, granted_scopes: ScopeSet) -> Self {
        Self {
            application: application.into(),
            granted_scopes,
        }
    }
}

/// Result of a [`ConsentLedger::grant`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantOutcome {
    /// Whether a new record was created for the application.
    pub created: bool,
    /// Number of scopes that were not granted before.
    pub added: usize,
}

/// Result of a [`ConsentLedger::revoke`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevokeOutcome {
    /// The ledger had no record for the application.
    NoRecord,
    /// Some scopes remain granted.
    Narrowed {
        /// Number of scopes removed.
        removed: usize,
        /// Number of scopes still granted.
        remaining: usize,
    },
    /// Every scope was revoked and the record was deleted.
    Deleted {
        /// Number of scopes removed.
        removed: usize,
    },
}

/// A user's granted scopes, keyed by application identifier.
///
/// Records keep the order in which applications were first granted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ConsentRecord>", into = "Vec<ConsentRecord>")]
pub struct ConsentLedger {
    records: IndexMap<String, ScopeSet>,
}

impl ConsentLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the granted scopes for an application, if any.
    #[must_use]
    pub fn get(&self, application: &str) -> Option<&ScopeSet> {
        self.records.get(application)
    }

    /// Returns the number of applications with recorded consent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the user has not consented to any application.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the ledger as an ordered list of records.
    #[must_use]
    pub fn records(&self) -> Vec<ConsentRecord> {
        self.records
            .iter()
            .map(|(application, scopes)| ConsentRecord::new(application, scopes.clone()))
            .collect()
    }

    /// Adds scopes to the application's record.
    ///
    /// Existing scopes keep their order and new scopes are appended in input
    /// order without duplicates. A record is created on the first grant that
    /// carries at least one scope. Granting the same scopes again changes
    /// nothing.
    pub fn grant<I, S>(&mut self, application: &str, scopes: I) -> GrantOutcome
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(granted) = self.records.get_mut(application) {
            let added = granted.extend_from(scopes);
            return GrantOutcome {
                created: false,
                added,
            };
        }

        let granted: ScopeSet = scopes.into_iter().collect();
        if granted.is_empty() {
            return GrantOutcome {
                created: false,
                added: 0,
            };
        }

        let added = granted.len();
        self.records.insert(application.to_string(), granted);
        GrantOutcome {
            created: true,
            added,
        }
    }

    /// Removes scopes from the application's record.
    ///
    /// Records of other applications are untouched. Remaining scopes keep
    /// their relative order; a record left without scopes is deleted.
    /// Revoking scopes that are not granted, or revoking for an application
    /// without a record, is not an error.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRequest` if `application` is empty or `scopes` holds
    /// no scope.
    pub fn revoke<'a, I>(&mut self, application: &str, scopes: I) -> AuthResult<RevokeOutcome>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if application.is_empty() {
            return Err(AuthError::invalid_request("Application cannot be empty"));
        }

        let revoke: Vec<&str> = scopes.into_iter().collect();
        if revoke.is_empty() {
            return Err(AuthError::invalid_request("Granted scopes cannot be empty"));
        }

        let Some(granted) = self.records.get_mut(application) else {
            return Ok(RevokeOutcome::NoRecord);
        };

        let removed = granted.remove_all(revoke);
        if granted.is_empty() {
            self.records.shift_remove(application);
            return Ok(RevokeOutcome::Deleted { removed });
        }

        Ok(RevokeOutcome::Narrowed {
            removed,
            remaining: granted.len(),
        })
    }
}

impl From<Vec<ConsentRecord>> for ConsentLedger {
    fn from(records: Vec<ConsentRecord>) -> Self {
        let mut ledger = IndexMap::<String, ScopeSet>::with_capacity(records.len());
        for record in records {
            if record.granted_scopes.is_empty() {
                tracing::warn!(
                    application = %record.application,
                    "Dropping stored consent record without granted scopes"
                );
                continue;
            }
            match ledger.get_mut(&record.application) {
                Some(existing) => {
                    tracing::warn!(
                        application = %record.application,
                        "Merging duplicate consent records for application"
                    );
                    existing.extend_from(record.granted_scopes.iter());
                }
                None => {
                    ledger.insert(record.application, record.granted_scopes);
                }
            }
        }
        Self { records: ledger }
    }
}

impl From<ConsentLedger> for Vec<ConsentRecord> {
    fn from(ledger: ConsentLedger) -> Self {
        ledger
            .records
            .into_iter()
            .map(|(application, granted_scopes)| ConsentRecord {
                application,
                granted_scopes,
            })
            .collect()
    }
}
