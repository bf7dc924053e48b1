//! Catalog service: categories and products of the recyclables marketplace
//!
//! The data is bundled with the crate and never mutated after load.

pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;

pub use handlers::CatalogService;
pub use repositories::Catalog;
