//! Named-query manifest source
//!
//! Resolves a work reference through a configured URL template, the way a
//! DLCS-style image service exposes manifests by named query.

use serde_json::Value;

use crate::manifest::WorkMetadata;

use super::Parser;

pub struct NamedQueryParser {
    space: String,
    template: String,
}

impl NamedQueryParser {
    pub fn new(space: &str, template: &str) -> Self {
        Self {
            space: space.to_string(),
            template: template.to_string(),
        }
    }
}

impl Parser for NamedQueryParser {
    fn resolve_manifest_path(&self, work_reference: &str) -> String {
        self.template
            .replace("{space}", &self.space)
            .replace("{reference}", work_reference)
    }

    fn custom_decoration(&self, _meta: &WorkMetadata, _manifest: &mut Value) {
        // The named-query source carries no deployment-specific decoration.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_substitutes_space_and_reference() {
        let parser = NamedQueryParser::new(
            "heritage",
            "https://dlcs.example.org/iiif-resource/{space}/manifest-by-reference/{reference}",
        );
        assert_eq!(
            parser.resolve_manifest_path("b12345678"),
            "https://dlcs.example.org/iiif-resource/heritage/manifest-by-reference/b12345678"
        );
    }

    #[test]
    fn test_custom_decoration_is_a_no_op() {
        let parser = NamedQueryParser::new("heritage", "{reference}");
        let meta: WorkMetadata =
            serde_json::from_str(r#"{"meta": [], "image_metadata": {}}"#).unwrap();
        let mut manifest = serde_json::json!({"@id": "x"});
        let before = manifest.clone();

        parser.custom_decoration(&meta, &mut manifest);
        assert_eq!(manifest, before);
    }
}
