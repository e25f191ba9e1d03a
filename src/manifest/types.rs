//! Work metadata types
//!
//! The `work-<reference>` store record that drives decoration. Field lists
//! and bibliographic values are kept as raw JSON so they survive verbatim
//! into the manifest, unknown keys included.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Source-of-truth metadata for a work, owned by the object store.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkMetadata {
    /// Bibliographic fields, copied verbatim into `manifest.metadata`.
    pub meta: Value,
    /// Canvas-index-as-string to raw label/value field list.
    pub image_metadata: Map<String, Value>,
    /// Section label to canvas index list; insertion order is significant.
    #[serde(default)]
    pub toc: Option<Map<String, Value>>,
    /// Optional behavior flags.
    #[serde(default)]
    pub flags: Option<Map<String, Value>>,
}

impl WorkMetadata {
    /// The field name whose value becomes each canvas label, when configured.
    /// A missing or null flag means the numeric fallback applies.
    pub fn canvas_label_field(&self) -> Option<&Value> {
        let field = self.flags.as_ref()?.get("Canvas_Label_Field")?;
        if field.is_null() {
            None
        } else {
            Some(field)
        }
    }
}
