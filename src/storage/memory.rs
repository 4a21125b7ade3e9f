//! In-memory content store
//!
//! Used by unit tests and local development runs that have no object
//! storage available.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::error::ContentStoreError;
use super::key::ContentKey;
use super::ContentStore;

/// Content store holding blobs in a process-local map.
#[derive(Default)]
pub struct MemoryContentStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.read().expect("store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn put(&self, key: &ContentKey, content: &[u8]) -> Result<(), ContentStoreError> {
        self.blobs
            .write()
            .expect("store lock poisoned")
            .insert(key.to_string(), content.to_vec());
        Ok(())
    }

    async fn get(&self, key: &ContentKey) -> Result<Vec<u8>, ContentStoreError> {
        self.blobs
            .read()
            .expect("store lock poisoned")
            .get(&key.to_string())
            .cloned()
            .ok_or_else(|| ContentStoreError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &ContentKey) -> Result<(), ContentStoreError> {
        self.blobs
            .write()
            .expect("store lock poisoned")
            .remove(&key.to_string());
        Ok(())
    }

    async fn size(&self, key: &ContentKey) -> Result<u64, ContentStoreError> {
        self.blobs
            .read()
            .expect("store lock poisoned")
            .get(&key.to_string())
            .map(|b| b.len() as u64)
            .ok_or_else(|| ContentStoreError::NotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn put_overwrites_in_place() {
        let store = MemoryContentStore::new();
        let key = ContentKey::input(Uuid::new_v4(), Uuid::new_v4());

        store.put(&key, b"1 2").await.unwrap();
        store.put(&key, b"3 4 5").await.unwrap();

        assert_eq!(store.get(&key).await.unwrap(), b"3 4 5");
        assert_eq!(store.size(&key).await.unwrap(), 5);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn get_missing_blob_is_not_found() {
        let store = MemoryContentStore::new();
        let key = ContentKey::output(Uuid::new_v4(), Uuid::new_v4());

        let err = store.get(&key).await.unwrap_err();
        assert!(matches!(err, ContentStoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryContentStore::new();
        let key = ContentKey::input(Uuid::new_v4(), Uuid::new_v4());

        store.put(&key, b"data").await.unwrap();
        store.delete(&key).await.unwrap();
        store.delete(&key).await.unwrap();

        assert!(store.is_empty());
    }
}
