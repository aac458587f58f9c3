//! Domain types for applications and users.

pub mod application;
pub mod user;

pub use application::{Application, ApplicationValidationError};
pub use user::{User, UserField};
