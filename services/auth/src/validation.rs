//! Input validation utilities

use common::{ServiceError, ServiceResult};

use crate::models::Credentials;

pub const CREDENTIALS_REQUIRED: &str = "email and password required";

/// Normalize an email for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Credentials that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCredentials {
    /// Normalized email
    pub email: String,
    /// Password exactly as submitted
    pub password: String,
}

/// Validate a register/login payload
///
/// The email must be non-empty after normalization and the password must be
/// non-empty. The password itself is never trimmed.
pub fn validate_credentials(credentials: &Credentials) -> ServiceResult<ValidCredentials> {
    let email = credentials
        .email
        .as_deref()
        .map(normalize_email)
        .filter(|email| !email.is_empty());

    let password = credentials
        .password
        .as_deref()
        .filter(|password| !password.is_empty());

    match (email, password) {
        (Some(email), Some(password)) => Ok(ValidCredentials {
            email,
            password: password.to_string(),
        }),
        _ => Err(ServiceError::Validation(CREDENTIALS_REQUIRED)),
    }
}
