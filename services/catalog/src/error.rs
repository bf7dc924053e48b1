//! Custom error types for the catalog service

use thiserror::Error;

/// Raised when the bundled catalog data is unusable
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The data could not be parsed
    #[error("Invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries share an id
    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    /// A product field is outside its allowed range
    #[error("Product {id}: {reason}")]
    InvalidProduct { id: String, reason: &'static str },
}

/// Type alias for catalog results
pub type CatalogResult<T> = Result<T, CatalogError>;
