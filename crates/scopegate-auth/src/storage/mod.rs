//! Storage traits for consent-related data.
//!
//! This module defines storage interfaces for:
//!
//! - Users and their consent ledgers
//! - OAuth application registrations
//! - Authorization code sessions
//! - Login sessions of the calling user
//!
//! # Implementations
//!
//! Storage implementations are provided in separate crates:
//!
//! - `scopegate-db-memory` - in-memory backend

pub mod application;
pub mod login_session;
pub mod session;
pub mod user;

pub use application::ApplicationStorage;
pub use login_session::LoginSessionStorage;
pub use session::SessionStorage;
pub use user::UserStorage;
