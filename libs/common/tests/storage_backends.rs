//! Integration tests for the storage backends
//!
//! Both backends must honour the same get/set/remove contract through the
//! `KeyValueStorage` trait object the credential store is handed.

use std::sync::Arc;

use common::{
    KeyValueStorage, MemoryStorage,
    cache::{RedisConfig, RedisStorage},
    storage::{StorageBackend, StorageConfig, connect},
};

async fn exercise_contract(storage: Arc<dyn KeyValueStorage>) -> Result<(), Box<dyn std::error::Error>> {
    assert!(storage.health_check().await?, "Storage health check failed");

    let key = "integration_test_key";
    storage.remove(key).await?;
    assert_eq!(storage.get(key).await?, None);

    storage.set(key, "first").await?;
    storage.set(key, "second").await?;
    assert_eq!(
        storage.get(key).await?,
        Some("second".to_string()),
        "set must overwrite"
    );

    storage.remove(key).await?;
    assert_eq!(storage.get(key).await?, None, "remove failed");

    Ok(())
}

#[tokio::test]
async fn test_memory_backend_contract() -> Result<(), Box<dyn std::error::Error>> {
    exercise_contract(Arc::new(MemoryStorage::new())).await
}

#[tokio::test]
async fn test_connect_builds_memory_backend() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorageConfig {
        backend: StorageBackend::Memory,
    };
    let storage = connect(&config).await?;
    exercise_contract(storage).await
}

/// Run with: cargo test --test storage_backends -- --ignored
#[tokio::test]
#[ignore = "requires a running Redis"]
async fn test_redis_backend_contract() -> Result<(), Box<dyn std::error::Error>> {
    let config = RedisConfig::from_env()?;
    let storage = RedisStorage::new(&config).await?;
    exercise_contract(Arc::new(storage)).await
}
