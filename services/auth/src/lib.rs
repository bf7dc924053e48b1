//! Authentication service for the marketplace mock backend
//!
//! Users and sessions live in a [`CredentialStore`] over any
//! [`common::KeyValueStorage`]; [`AuthService`] implements the register,
//! login and session-check handlers on top of it.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod store;
pub mod token;
pub mod validation;

pub use handlers::AuthService;
pub use models::{Credentials, Session, User, UserView};
pub use store::CredentialStore;
