//! Ask-once consent policy.
//!
//! Consent is collected once per application and scope: a request whose
//! declared scopes are all already granted skips the consent screen.
//!
//! # Decision
//!
//! ```text
//! catalog empty                      → not required
//! requested ∩ catalog = ∅            → not required
//! requested ∩ catalog ⊆ granted      → not required
//! otherwise                          → required
//! ```

use serde::Serialize;

use super::catalog::{ScopeCatalog, ScopeDescription};
use super::ledger::ConsentLedger;
use super::scope_set::ScopeSet;

/// Outcome of a consent evaluation, with the data a consent screen needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentCheck {
    /// Whether the user must approve the request before a code is issued.
    pub required: bool,

    /// Requested scopes that the application declares.
    pub valid_requested_scopes: ScopeSet,

    /// Descriptions of every requested scope, in request order.
    pub scopes: Vec<ScopeDescription>,
}

/// Stateless consent decision logic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsentPolicy;

impl ConsentPolicy {
    /// Returns `true` if the user must consent before a code is issued.
    ///
    /// Unknown scopes in `requested_scope` are ignored. The ledger is only
    /// read.
    #[must_use]
    pub fn is_consent_required(
        ledger: &ConsentLedger,
        application_id: &str,
        catalog: &ScopeCatalog,
        requested_scope: &str,
    ) -> bool {
        if catalog.is_empty() {
            return false;
        }

        let requested = ScopeSet::parse(requested_scope);
        Self::decide(ledger, application_id, &catalog.filter(&requested))
    }

    /// Evaluates a request and describes its scopes for a consent screen.
    #[must_use]
    pub fn evaluate(
        ledger: &ConsentLedger,
        application_id: &str,
        catalog: &ScopeCatalog,
        requested_scope: &str,
    ) -> ConsentCheck {
        let requested = ScopeSet::parse(requested_scope);
        let valid_requested_scopes = catalog.filter(&requested);
        let required = !catalog.is_empty()
            && Self::decide(ledger, application_id, &valid_requested_scopes);

        tracing::debug!(
            application = %application_id,
            requested = requested.len(),
            valid = valid_requested_scopes.len(),
            required,
            "Consent evaluated"
        );

        ConsentCheck {
            required,
            scopes: catalog.describe(&requested),
            valid_requested_scopes,
        }
    }

    fn decide(ledger: &ConsentLedger, application_id: &str, valid_requested: &ScopeSet) -> bool {
        if valid_requested.is_empty() {
            return false;
        }

        match ledger.get(application_id) {
            Some(granted) => !valid_requested.is_subset_of(granted),
            None => true,
        }
    }
}
