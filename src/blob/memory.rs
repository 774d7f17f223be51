use async_trait::async_trait;
use dashmap::DashMap;

use super::{BlobStore, new_blob_ref};
use crate::errors::{PortalError, Result};

/// 进程内文件存储（测试与临时部署用）
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: DashMap<String, Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn contains(&self, blob_ref: &str) -> bool {
        self.blobs.contains_key(blob_ref)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn store(&self, bytes: Vec<u8>, _suggested_name: &str) -> Result<String> {
        let blob_ref = new_blob_ref();
        self.blobs.insert(blob_ref.clone(), bytes);
        Ok(blob_ref)
    }

    async fn retrieve(&self, blob_ref: &str) -> Result<Vec<u8>> {
        self.blobs
            .get(blob_ref)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| PortalError::not_found("File not found"))
    }

    async fn remove(&self, blob_ref: &str) -> Result<()> {
        self.blobs.remove(blob_ref);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_retrieve_remove() {
        let store = MemoryBlobStore::new();
        let blob_ref = store.store(vec![1, 2, 3], "answer.py").await.unwrap();
        assert!(blob_ref.ends_with(".bin"));
        assert_eq!(store.retrieve(&blob_ref).await.unwrap(), vec![1, 2, 3]);

        store.remove(&blob_ref).await.unwrap();
        assert!(store.is_empty());
        let err = store.retrieve(&blob_ref).await.unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));
        // 重复删除不报错
        store.remove(&blob_ref).await.unwrap();
    }
}
