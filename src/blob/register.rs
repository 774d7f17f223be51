use crate::blob::{BlobStore, LocalBlobStore, MemoryBlobStore};
use crate::config::AppConfig;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedBlobStoreFuture = Pin<Box<dyn Future<Output = Result<Box<dyn BlobStore>>> + Send>>;
pub type BlobStoreConstructor = Arc<dyn Fn() -> BoxedBlobStoreFuture + Send + Sync>;

static BLOB_STORE_REGISTRY: Lazy<RwLock<HashMap<String, BlobStoreConstructor>>> =
    Lazy::new(|| {
        let mut registry: HashMap<String, BlobStoreConstructor> = HashMap::new();
        registry.insert(
            "local".to_string(),
            Arc::new(|| -> BoxedBlobStoreFuture {
                Box::pin(async {
                    let store = LocalBlobStore::new(&AppConfig::get().upload.dir).await?;
                    Ok(Box::new(store) as Box<dyn BlobStore>)
                })
            }),
        );
        registry.insert(
            "memory".to_string(),
            Arc::new(|| -> BoxedBlobStoreFuture {
                Box::pin(async { Ok(Box::new(MemoryBlobStore::new()) as Box<dyn BlobStore>) })
            }),
        );
        RwLock::new(registry)
    });

pub fn register_blob_store_plugin<S: Into<String>>(name: S, constructor: BlobStoreConstructor) {
    let name = name.into();
    let mut registry = BLOB_STORE_REGISTRY
        .write()
        .expect("Blob store registry lock poisoned");
    registry.insert(name, constructor);
}

pub fn get_blob_store_plugin(name: &str) -> Option<BlobStoreConstructor> {
    BLOB_STORE_REGISTRY
        .read()
        .expect("Blob store registry lock poisoned")
        .get(name)
        .cloned()
}

pub fn debug_blob_store_registry() {
    let registry = BLOB_STORE_REGISTRY
        .read()
        .expect("Blob store registry lock poisoned");
    tracing::debug!("Registered blob store backends:");
    for key in registry.keys() {
        tracing::debug!(" - {}", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_builtin_backends_are_registered() {
        assert!(get_blob_store_plugin("local").is_some());
        assert!(get_blob_store_plugin("s3").is_none());

        let constructor = get_blob_store_plugin("memory").unwrap();
        let store = constructor().await.unwrap();
        let blob_ref = store.store(b"hello".to_vec(), "a.txt").await.unwrap();
        assert_eq!(store.retrieve(&blob_ref).await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_register_custom_backend() {
        register_blob_store_plugin(
            "scratch",
            Arc::new(|| -> BoxedBlobStoreFuture {
                Box::pin(async { Ok(Box::new(MemoryBlobStore::new()) as Box<dyn BlobStore>) })
            }),
        );
        assert!(get_blob_store_plugin("scratch").is_some());
    }
}
