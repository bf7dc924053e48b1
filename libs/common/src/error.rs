//! Custom error types for the common library
//!
//! This module defines the error kinds shared by the marketplace services:
//! storage failures, which never leave the credential store, and request
//! failures, which every handler turns into a structured reply.

use axum::http::StatusCode;
use thiserror::Error;

/// Error raised by a key/value storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backend could not be reached
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Error returned by Redis
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Request-level failure returned by a handler
///
/// Each kind is terminal for the request that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(&'static str),

    /// The resource already exists
    #[error("{0}")]
    Conflict(&'static str),

    /// Bad credentials, or a missing or unknown token
    #[error("{0}")]
    Authentication(&'static str),

    /// Unknown category, product or route
    #[error("{0}")]
    NotFound(&'static str),
}

impl ServiceError {
    /// HTTP status carried by this error
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

/// Type alias for handler results
pub type ServiceResult<T> = Result<T, ServiceError>;
