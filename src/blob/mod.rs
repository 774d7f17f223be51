//! 提交文件的存储后端
//!
//! 核心流程只通过 `store` / `retrieve` / `remove` 访问文件，不检查内容或扩展名。

pub mod local;
pub mod memory;
pub mod register;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::errors::{PortalError, Result};

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// 保存文件内容，返回后端内的引用
    async fn store(&self, bytes: Vec<u8>, suggested_name: &str) -> Result<String>;
    /// 读取文件内容，不存在时返回 NotFound
    async fn retrieve(&self, blob_ref: &str) -> Result<Vec<u8>>;
    /// 删除文件，不存在时视为成功
    async fn remove(&self, blob_ref: &str) -> Result<()>;
}

/// 生成新的文件引用
pub(crate) fn new_blob_ref() -> String {
    format!(
        "{}-{}.bin",
        chrono::Utc::now().timestamp(),
        uuid::Uuid::new_v4()
    )
}

/// 按配置创建存储后端
pub async fn create_blob_store() -> Result<Arc<dyn BlobStore>> {
    let config = AppConfig::get();
    let backend = config.upload.backend.as_str();

    let constructor = register::get_blob_store_plugin(backend).ok_or_else(|| {
        PortalError::blob_plugin_not_found(format!("Blob store backend not found: {backend}"))
    })?;

    let store = constructor().await?;
    tracing::info!("Blob store initialized with backend: {}", backend);
    Ok(Arc::from(store))
}
