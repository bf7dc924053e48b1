//! Key/value storage capability
//!
//! The credential store never talks to a concrete backend. It is handed an
//! `Arc<dyn KeyValueStorage>` chosen once at startup from [`StorageConfig`]:
//! either the in-memory map, or Redis for state that outlives a single process.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{RedisConfig, RedisStorage};
use crate::error::StorageResult;

/// String-keyed storage with explicit fallible operations
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> StorageResult<()>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> StorageResult<bool>;
}

/// Process-local storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        Ok(true)
    }
}

/// Which backend to build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Redis(RedisConfig),
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

impl StorageConfig {
    /// Create a new StorageConfig from environment variables
    ///
    /// # Environment Variables
    /// - `STORAGE_BACKEND`: `memory` or `redis` (default: `memory`)
    /// - `REDIS_URL`, `STORAGE_NAMESPACE`: see [`RedisConfig::from_env`]
    pub fn from_env() -> Result<Self> {
        let backend = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "memory".to_string());

        let backend = match backend.trim().to_ascii_lowercase().as_str() {
            "memory" => StorageBackend::Memory,
            "redis" => StorageBackend::Redis(RedisConfig::from_env()?),
            other => anyhow::bail!("Unknown STORAGE_BACKEND: {}", other),
        };

        Ok(StorageConfig { backend })
    }
}

/// Build the configured backend
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn KeyValueStorage>> {
    match &config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::Redis(redis_config) => {
            let storage = RedisStorage::new(redis_config).await?;
            Ok(Arc::new(storage))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[tokio::test]
    async fn test_memory_set_get_remove() {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get("auth:users").await.unwrap(), None);

        storage.set("auth:users", "[]").await.unwrap();
        assert_eq!(
            storage.get("auth:users").await.unwrap(),
            Some("[]".to_string())
        );

        storage.set("auth:users", "[1]").await.unwrap();
        assert_eq!(
            storage.get("auth:users").await.unwrap(),
            Some("[1]".to_string())
        );

        storage.remove("auth:users").await.unwrap();
        storage.remove("auth:users").await.unwrap();
        assert_eq!(storage.get("auth:users").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set("auth:seeded", "true").await.unwrap();
        assert_eq!(
            other.get("auth:seeded").await.unwrap(),
            Some("true".to_string())
        );
    }

    #[test]
    #[serial]
    fn test_storage_config_defaults_to_memory() {
        unsafe {
            std::env::remove_var("STORAGE_BACKEND");
        }

        let config = StorageConfig::from_env().unwrap();
        assert_eq!(config.backend, StorageBackend::Memory);
    }

    #[test]
    #[serial]
    fn test_storage_config_redis() {
        unsafe {
            std::env::set_var("STORAGE_BACKEND", "Redis");
            std::env::set_var("REDIS_URL", "redis://cache:6379");
            std::env::set_var("STORAGE_NAMESPACE", "test");
        }

        let config = StorageConfig::from_env().unwrap();
        assert_eq!(
            config.backend,
            StorageBackend::Redis(RedisConfig {
                url: "redis://cache:6379".to_string(),
                namespace: "test".to_string(),
            })
        );

        unsafe {
            std::env::remove_var("STORAGE_BACKEND");
            std::env::remove_var("REDIS_URL");
            std::env::remove_var("STORAGE_NAMESPACE");
        }
    }

    #[test]
    #[serial]
    fn test_storage_config_rejects_unknown_backend() {
        unsafe {
            std::env::set_var("STORAGE_BACKEND", "sqlite");
        }

        assert!(StorageConfig::from_env().is_err());

        unsafe {
            std::env::remove_var("STORAGE_BACKEND");
        }
    }
}
