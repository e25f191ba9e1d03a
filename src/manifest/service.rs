//! Cache-fill orchestration
//!
//! Serves a work's decorated manifest out of the object store, generating
//! and writing it through on a miss. Concurrent first requests for the same
//! work may each fill independently; the pipeline is deterministic, so
//! last-writer-wins puts converge on identical bytes and nobody blocks on
//! anyone else's in-flight generation.

use std::sync::Arc;

use serde_json::Value;

use crate::error::{AppError, Result};
use crate::source::{ManifestFetcher, Parser};
use crate::storage::{manifest_cache_key, work_meta_key, MetadataStore};

use super::types::WorkMetadata;
use super::{decorate, ids};

pub struct ManifestService {
    store: Arc<dyn MetadataStore>,
    parser: Arc<dyn Parser>,
    fetcher: Arc<dyn ManifestFetcher>,
    public_base_url: String,
}

impl ManifestService {
    pub fn new(
        store: Arc<dyn MetadataStore>,
        parser: Arc<dyn Parser>,
        fetcher: Arc<dyn ManifestFetcher>,
        public_base_url: String,
    ) -> Self {
        Self {
            store,
            parser,
            fetcher,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The work's public identifier, the root of every rewritten id.
    ///
    /// Derived from configuration rather than the inbound request URL so
    /// that decoration is a pure function of the work reference.
    fn work_id(&self, work_reference: &str) -> String {
        format!("{}/work/{}", self.public_base_url, work_reference)
    }

    /// Serve the decorated manifest for a work, filling the cache on miss.
    pub async fn get_decorated_manifest(&self, work_reference: &str) -> Result<Vec<u8>> {
        let cache_key = manifest_cache_key(work_reference);

        // Trust-on-read: cached bytes are returned untouched. A store error
        // counts as a miss.
        match self.store.get(&cache_key).await {
            Ok(bytes) => {
                tracing::debug!("Cache hit for {}", cache_key);
                return Ok(bytes);
            }
            Err(e) => {
                tracing::debug!("Cache miss for {}: {}", cache_key, e);
            }
        }

        let meta = self.load_work_meta(work_reference).await?;

        let path = self.parser.resolve_manifest_path(work_reference);
        tracing::debug!("Fetching base manifest for {} from {}", work_reference, path);
        let body = self
            .fetcher
            .fetch(&path)
            .await
            .map_err(|e| AppError::UpstreamFetch(e.to_string()))?;

        let bytes = self.decorate(&body, &meta, work_reference)?;
        if bytes.is_empty() {
            tracing::error!("Generated decorated manifest was empty, skipping write-back");
            return Ok(bytes);
        }

        // May race another in-flight fill for the same reference; repeated
        // writes carry identical content, so the race only costs work.
        if let Err(e) = self.store.put(&cache_key, bytes.clone()).await {
            tracing::error!("Failed to store decorated manifest {}: {}", cache_key, e);
        }

        Ok(bytes)
    }

    /// Run the transform pipeline in its fixed order and serialize.
    fn decorate(&self, body: &str, meta: &WorkMetadata, work_reference: &str) -> Result<Vec<u8>> {
        let mut manifest: Value = serde_json::from_str(body)?;
        let work_id = self.work_id(work_reference);

        ids::rewrite_identifiers(&mut manifest, &work_id)?;
        let canvas_map = ids::build_canvas_map(&manifest)?;
        decorate::decorate_metadata(meta, &mut manifest)?;
        decorate::decorate_toc(meta, &mut manifest, &canvas_map, &work_id)?;
        decorate::decorate_image_metadata(meta, &mut manifest)?;
        self.parser.custom_decoration(meta, &mut manifest);

        Ok(serde_json::to_vec(&manifest)?)
    }

    async fn load_work_meta(&self, work_reference: &str) -> Result<WorkMetadata> {
        let key = work_meta_key(work_reference);
        let bytes = self.store.get(&key).await.map_err(|e| {
            tracing::error!("Work data not found: {}: {}", work_reference, e);
            AppError::MetadataNotFound(work_reference.to_string())
        })?;

        serde_json::from_slice(&bytes)
            .map_err(|e| AppError::WorkMetadata(format!("{}: {}", key, e)))
    }
}
