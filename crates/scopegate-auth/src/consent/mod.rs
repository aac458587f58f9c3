//! Consent ledger and ask-once consent policy.
//!
//! This module owns the representation of granted scopes and the rules that
//! decide whether a user has to approve an authorization request:
//!
//! - [`ScopeSet`] - ordered scope set and the `scope` parameter parser
//! - [`ScopeCatalog`] - custom scopes an application declares as consentable
//! - [`ConsentLedger`] - per-user granted scopes with grant/revoke
//! - [`ConsentPolicy`] - the consent-required decision
//!
//! Everything here is synchronous and free of I/O. Loading and persisting the
//! ledger is done by [`crate::service::ConsentService`].

pub mod catalog;
pub mod ledger;
pub mod policy;
pub mod scope_set;

pub use catalog::{
    CatalogValidationError, ScopeCatalog, ScopeDescription, UNDECLARED_SCOPE_DESCRIPTION,
};
pub use ledger::{ConsentLedger, ConsentRecord, GrantOutcome, RevokeOutcome};
pub use policy::{ConsentCheck, ConsentPolicy};
pub use scope_set::ScopeSet;
