use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{BlobStore, new_blob_ref};
use crate::errors::{PortalError, Result};

/// 本地目录文件存储
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// 创建存储并确保目录存在
    pub async fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let root = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| PortalError::file_operation(format!("创建上传目录失败: {e}")))?;
        debug!("Local blob store rooted at {}", root.display());
        Ok(Self { root })
    }

    /// 引用只能是单层文件名
    fn resolve(&self, blob_ref: &str) -> Result<PathBuf> {
        let valid = !blob_ref.is_empty()
            && !blob_ref.contains(['/', '\\'])
            && blob_ref != "."
            && blob_ref != "..";
        if !valid {
            return Err(PortalError::not_found("File not found"));
        }
        Ok(self.root.join(blob_ref))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn store(&self, bytes: Vec<u8>, suggested_name: &str) -> Result<String> {
        let blob_ref = new_blob_ref();
        let path = self.root.join(&blob_ref);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| PortalError::file_operation(format!("保存文件失败: {e}")))?;
        debug!("Stored upload '{}' as {}", suggested_name, blob_ref);
        Ok(blob_ref)
    }

    async fn retrieve(&self, blob_ref: &str) -> Result<Vec<u8>> {
        let path = self.resolve(blob_ref)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PortalError::not_found("File not found"))
            }
            Err(e) => Err(PortalError::file_operation(format!("读取文件失败: {e}"))),
        }
    }

    async fn remove(&self, blob_ref: &str) -> Result<()> {
        let path = self.resolve(blob_ref)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PortalError::file_operation(format!("删除文件失败: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_local_round_trip() {
        let dir = std::env::temp_dir().join(format!("evalportal-blob-{}", uuid::Uuid::new_v4()));
        let store = LocalBlobStore::new(&dir).await.unwrap();

        let blob_ref = store.store(b"print(42)".to_vec(), "main.py").await.unwrap();
        assert!(dir.join(&blob_ref).exists());
        assert_eq!(store.retrieve(&blob_ref).await.unwrap(), b"print(42)");

        store.remove(&blob_ref).await.unwrap();
        assert!(!dir.join(&blob_ref).exists());
        store.remove(&blob_ref).await.unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let dir = std::env::temp_dir().join(format!("evalportal-blob-{}", uuid::Uuid::new_v4()));
        let store = LocalBlobStore::new(&dir).await.unwrap();

        let err = store.retrieve("../etc/passwd").await.unwrap_err();
        assert!(matches!(err, PortalError::NotFound(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
