//! Manifest decoration pipeline
//!
//! - `ids`: positional identifier rewriting and the canvas map
//! - `decorate`: the three metadata enrichment passes
//! - `service`: cache-fill orchestration over the store and source
//! - `types`: the stored work metadata record

pub mod decorate;
pub mod ids;
pub mod service;
pub mod types;

pub use service::ManifestService;
pub use types::WorkMetadata;
