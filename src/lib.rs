//! Folio Server Library
//!
//! Serves enriched IIIF-style presentation manifests for digitized works,
//! backed by an S3-compatible object store used as a read-through cache.
//! The main server binary is in main.rs.
//!
//! # Modules
//!
//! - `manifest`: the cache-fill decoration pipeline
//! - `source`: upstream manifest resolution and fetching
//! - `storage`: the object-store capability and its S3 implementation
//! - `routes`: the HTTP surface

pub mod config;
pub mod error;
pub mod manifest;
pub mod routes;
pub mod source;
pub mod state;
pub mod storage;
