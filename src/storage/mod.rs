//! Object storage access
//!
//! The decoration pipeline only needs get/put by key, so that is the whole
//! capability surface; the production implementation wraps S3.

mod s3_client;

pub use s3_client::S3Client;

use async_trait::async_trait;

use crate::error::StorageError;

/// Key of the source-of-truth metadata record for a work.
pub fn work_meta_key(work_reference: &str) -> String {
    format!("work-{}", work_reference)
}

/// Key of the cached decorated manifest for a work.
pub fn manifest_cache_key(work_reference: &str) -> String {
    format!("work-{}.manifest", work_reference)
}

/// Key/value byte storage with get/put semantics.
///
/// No transactions, no versioning: concurrent puts for the same key resolve
/// last-writer-wins, which the cache-fill orchestrator relies on.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Fetch an object. A missing key is `StorageError::ObjectNotFound`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Store an object, overwriting any existing value.
    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError>;
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(work_meta_key("42"), "work-42");
        assert_eq!(manifest_cache_key("42"), "work-42.manifest");
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = memory::MemoryStore::new();
        store.put("work-1", b"abc".to_vec()).await.unwrap();
        assert_eq!(store.get("work-1").await.unwrap(), b"abc");

        match store.get("work-2").await {
            Err(StorageError::ObjectNotFound(key)) => assert_eq!(key, "work-2"),
            other => panic!("expected ObjectNotFound, got {:?}", other),
        }
    }
}
