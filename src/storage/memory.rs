use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    errors::{AppError, AppResult},
    storage::{blob_key, BlobStore},
};

#[derive(Default, Clone)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub async fn contains(&self, key: &str) -> bool {
        self.blobs.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, file_name: &str, data: &[u8]) -> AppResult<String> {
        let key = blob_key(file_name);
        self.blobs.write().await.insert(key.clone(), data.to_vec());
        Ok(key)
    }

    async fn get(&self, key: &str) -> AppResult<Vec<u8>> {
        self.blobs
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| AppError::NotFound("File content not found!".to_string()))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.blobs.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryBlobStore::default();
        let key = store.put("a.bin", &[1, 2, 3]).await.unwrap();

        assert!(store.contains(&key).await);
        assert_eq!(store.get(&key).await.unwrap(), vec![1, 2, 3]);

        store.delete(&key).await.unwrap();
        assert!(store.is_empty().await);
        assert!(matches!(store.get(&key).await, Err(AppError::NotFound(_))));
    }
}
