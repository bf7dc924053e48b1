//! Common library for the marketplace mock backend
//!
//! This crate provides functionality shared by the auth, catalog and gateway
//! services: the key/value storage capability with its in-memory and Redis
//! backends, the error taxonomy, and the structured reply every handler
//! returns.
//!
//! ```rust,no_run
//! use common::storage::{StorageConfig, connect};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = StorageConfig::from_env()?;
//!     let storage = connect(&config).await?;
//!     storage.set("greeting", "hello").await?;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
pub mod reply;
pub mod storage;

pub use error::{ServiceError, ServiceResult, StorageError, StorageResult};
pub use reply::Reply;
pub use storage::{KeyValueStorage, MemoryStorage};
