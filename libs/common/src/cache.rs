//! Redis storage backend
//!
//! Keys are prefixed with a namespace so several marketplace instances can
//! share one Redis without seeing each other's users and sessions.

use anyhow::Result;
use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use tracing::info;

use crate::error::{StorageError, StorageResult};
use crate::storage::KeyValueStorage;

/// Configuration for Redis connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379")
    pub url: String,
    /// Prefix added to every key
    pub namespace: String,
}

impl RedisConfig {
    /// Create a new RedisConfig from environment variables
    ///
    /// # Environment Variables
    /// - `REDIS_URL`: Redis connection URL (default: "redis://localhost:6379")
    /// - `STORAGE_NAMESPACE`: Key prefix (default: "marketplace")
    pub fn from_env() -> Result<Self> {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let namespace =
            std::env::var("STORAGE_NAMESPACE").unwrap_or_else(|_| "marketplace".to_string());

        Ok(RedisConfig { url, namespace })
    }
}

/// Redis-backed key/value storage
#[derive(Clone)]
pub struct RedisStorage {
    client: Client,
    namespace: String,
}

impl RedisStorage {
    /// Initialize a new Redis client
    pub async fn new(config: &RedisConfig) -> Result<Self> {
        let client = Client::open(config.url.clone())?;
        info!("Redis client initialized with URL: {}", config.url);
        Ok(RedisStorage {
            client,
            namespace: config.namespace.clone(),
        })
    }

    /// A connection that cannot be established is reported as `Unavailable`
    async fn get_connection(&self) -> StorageResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.namespace, key)
    }
}

#[async_trait]
impl KeyValueStorage for RedisStorage {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut conn = self.get_connection().await?;
        let value: Option<String> = conn.get(self.namespaced(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.set(self.namespaced(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let mut conn = self.get_connection().await?;
        let _: u64 = conn.del(self.namespaced(key)).await?;
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        let mut conn = self.get_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(pong == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RedisConfig {
        RedisConfig {
            url: "redis://localhost:6379".to_string(),
            namespace: "marketplace-test".to_string(),
        }
    }

    #[tokio::test]
    async fn test_keys_are_namespaced() -> Result<()> {
        let storage = RedisStorage::new(&config()).await?;
        assert_eq!(storage.namespaced("auth:users"), "marketplace-test:auth:users");
        Ok(())
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unavailable() -> Result<()> {
        let storage = RedisStorage::new(&RedisConfig {
            url: "redis://127.0.0.1:1".to_string(),
            namespace: "marketplace-test".to_string(),
        })
        .await?;

        assert!(matches!(
            storage.get("auth:users").await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            storage.health_check().await,
            Err(StorageError::Unavailable(_))
        ));
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running Redis"]
    async fn test_set_get_remove() -> Result<()> {
        let storage = RedisStorage::new(&config()).await?;
        assert!(storage.health_check().await?);

        storage.set("test_key", "test_value").await?;
        assert_eq!(storage.get("test_key").await?, Some("test_value".to_string()));

        storage.remove("test_key").await?;
        assert_eq!(storage.get("test_key").await?, None);

        Ok(())
    }
}
