//! Upstream manifest source
//!
//! Where base manifests come from. A `Parser` knows how a deployment maps a
//! work reference onto its manifest URL and which deployment-specific
//! decoration to apply; implementations are selected by configuration key
//! through [`create_parser`].

mod fetch;
mod named_query;

pub use fetch::{FetchError, HttpFetcher, ManifestFetcher};
pub use named_query::NamedQueryParser;

use std::sync::Arc;

use serde_json::Value;

use crate::config::SourceConfig;
use crate::error::AppError;
use crate::manifest::WorkMetadata;

/// Deployment-specific manifest source behavior.
pub trait Parser: Send + Sync {
    /// Resolve the upstream URL the work's base manifest is fetched from.
    fn resolve_manifest_path(&self, work_reference: &str) -> String;

    /// Deployment-specific decoration, applied after the standard passes.
    fn custom_decoration(&self, meta: &WorkMetadata, manifest: &mut Value);
}

/// Select a parser implementation by configuration key.
pub fn create_parser(config: &SourceConfig) -> Result<Arc<dyn Parser>, AppError> {
    match config.parser.as_str() {
        "named-query" => Ok(Arc::new(NamedQueryParser::new(
            &config.space,
            &config.manifest_query,
        ))),
        other => Err(AppError::Internal(format!(
            "Unknown source parser: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceConfig;

    #[test]
    fn test_registry_selects_named_query() {
        let config = SourceConfig {
            parser: "named-query".to_string(),
            space: "heritage".to_string(),
            manifest_query: "http://dlcs.example.org/{space}/manifest/{reference}".to_string(),
        };
        let parser = create_parser(&config).unwrap();
        assert_eq!(
            parser.resolve_manifest_path("42"),
            "http://dlcs.example.org/heritage/manifest/42"
        );
    }

    #[test]
    fn test_registry_rejects_unknown_parser() {
        let config = SourceConfig {
            parser: "no-such-parser".to_string(),
            space: "heritage".to_string(),
            manifest_query: String::new(),
        };
        assert!(create_parser(&config).is_err());
    }
}
