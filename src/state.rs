//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::manifest::ManifestService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    manifest_service: ManifestService,
}

impl AppState {
    pub fn new(config: Config, manifest_service: ManifestService) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                manifest_service,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the manifest service
    pub fn manifest_service(&self) -> &ManifestService {
        &self.inner.manifest_service
    }
}
