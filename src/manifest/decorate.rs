//! Manifest decoration passes
//!
//! Three independent enrichment passes over a rewritten manifest:
//! bibliographic metadata, table-of-contents structures, and per-canvas
//! image metadata. Each is a side effect on the manifest tree given the
//! work's stored metadata record.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::error::{AppError, Result};

use super::ids::canvases_mut;
use super::types::WorkMetadata;

/// Replace `manifest.metadata` with the work's bibliographic fields.
///
/// Full replace, no merge.
pub fn decorate_metadata(meta: &WorkMetadata, manifest: &mut Value) -> Result<()> {
    let root = manifest
        .as_object_mut()
        .ok_or_else(|| AppError::ManifestShape("manifest root is not an object".to_string()))?;
    root.insert("metadata".to_string(), meta.meta.clone());
    Ok(())
}

/// Emit `manifest.structures` from the work's table of contents.
///
/// One `sc:Range` per TOC entry, in insertion order, with canvas references
/// resolved through `canvas_map`. An entry that references an unmapped or
/// non-integer canvas is dropped with a warning; its range index is still
/// consumed so surviving ids do not shift. No TOC means no `structures`
/// field at all.
pub fn decorate_toc(
    meta: &WorkMetadata,
    manifest: &mut Value,
    canvas_map: &HashMap<usize, String>,
    work_id: &str,
) -> Result<()> {
    let Some(toc) = meta.toc.as_ref() else {
        return Ok(());
    };

    let mut structures = Vec::with_capacity(toc.len());

    for (range_index, (label, refs)) in toc.iter().enumerate() {
        let Some(refs) = refs.as_array() else {
            tracing::warn!(
                "TOC entry {:?} is not a canvas list, dropping entry",
                label
            );
            continue;
        };

        let mut mapped = Vec::with_capacity(refs.len());
        let mut complete = true;
        for canvas_ref in refs {
            let resolved = canvas_ref
                .as_u64()
                .map(|i| i as usize)
                .and_then(|i| canvas_map.get(&i));
            match resolved {
                Some(id) => mapped.push(Value::String(id.clone())),
                None => {
                    tracing::warn!(
                        "TOC entry {:?} references unmapped canvas {}, dropping entry",
                        label,
                        canvas_ref
                    );
                    complete = false;
                    break;
                }
            }
        }
        if !complete {
            continue;
        }

        structures.push(json!({
            "@type": "sc:Range",
            "@id": format!("{}/range/r-{}", work_id, range_index),
            "label": label,
            "canvases": mapped,
        }));
    }

    let root = manifest
        .as_object_mut()
        .ok_or_else(|| AppError::ManifestShape("manifest root is not an object".to_string()))?;
    root.insert("structures".to_string(), Value::Array(structures));
    Ok(())
}

/// Attach per-canvas metadata and compute every decorated canvas's label.
///
/// The label is the configured field's last matching value, empty string
/// when nothing matches, or the 1-based position when no field is
/// configured. An index past the end of the canvas list is fatal.
pub fn decorate_image_metadata(meta: &WorkMetadata, manifest: &mut Value) -> Result<()> {
    let label_field = meta.canvas_label_field().cloned();
    let canvases = canvases_mut(manifest)?;
    let len = canvases.len();

    for (index_string, fields) in &meta.image_metadata {
        let index: usize = index_string.trim().parse().map_err(|_| {
            AppError::WorkMetadata(format!(
                "image_metadata index {:?} is not a canvas position",
                index_string
            ))
        })?;

        let canvas = canvases
            .get_mut(index)
            .ok_or(AppError::ImageMetadataIndexOutOfRange { index, len })?
            .as_object_mut()
            .ok_or_else(|| {
                AppError::ManifestShape(format!("canvas {} is not an object", index))
            })?;

        canvas.insert("metadata".to_string(), fields.clone());

        let label = match &label_field {
            None => Value::String((index + 1).to_string()),
            Some(field) => {
                let mut page = Value::String(String::new());
                if let Some(items) = fields.as_array() {
                    for item in items {
                        let matches = item
                            .get("label")
                            .map(|l| !l.is_null() && l == field)
                            .unwrap_or(false);
                        if matches {
                            if let Some(value) = item.get("value") {
                                if !value.is_null() {
                                    // last match wins
                                    page = value.clone();
                                }
                            }
                        }
                    }
                }
                page
            }
        };
        canvas.insert("label".to_string(), label);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ids::{build_canvas_map, rewrite_identifiers};
    use serde_json::json;

    const WORK_ID: &str = "http://folio.example.org/work/42";

    fn rewritten_manifest(canvas_count: usize) -> Value {
        let canvases: Vec<Value> = (0..canvas_count)
            .map(|i| json!({"@id": format!("c{}", i), "images": []}))
            .collect();
        let mut manifest = json!({
            "@id": "upstream",
            "sequences": [{"@id": "s", "canvases": canvases}]
        });
        rewrite_identifiers(&mut manifest, WORK_ID).unwrap();
        manifest
    }

    fn meta_from(json: &str) -> WorkMetadata {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_metadata_full_replace() {
        let meta = meta_from(
            r#"{"meta": [{"label": "Title", "value": "A Book"}], "image_metadata": {}}"#,
        );
        let mut manifest = rewritten_manifest(1);
        manifest["metadata"] = json!(["stale"]);

        decorate_metadata(&meta, &mut manifest).unwrap();
        assert_eq!(
            manifest["metadata"],
            json!([{"label": "Title", "value": "A Book"}])
        );
    }

    #[test]
    fn test_toc_absent_produces_no_structures() {
        let meta = meta_from(r#"{"meta": [], "image_metadata": {}}"#);
        let mut manifest = rewritten_manifest(2);
        let map = build_canvas_map(&manifest).unwrap();

        decorate_toc(&meta, &mut manifest, &map, WORK_ID).unwrap();
        assert!(manifest.get("structures").is_none());
    }

    #[test]
    fn test_toc_ranges_in_insertion_order() {
        let meta = meta_from(
            r#"{"meta": [], "image_metadata": {},
                "toc": {"Preface": [0], "Chapter 1": [1, 2]}}"#,
        );
        let mut manifest = rewritten_manifest(3);
        let map = build_canvas_map(&manifest).unwrap();

        decorate_toc(&meta, &mut manifest, &map, WORK_ID).unwrap();

        let structures = manifest["structures"].as_array().unwrap();
        assert_eq!(structures.len(), 2);

        assert_eq!(structures[0]["@type"], "sc:Range");
        assert_eq!(structures[0]["@id"], format!("{}/range/r-0", WORK_ID));
        assert_eq!(structures[0]["label"], "Preface");
        assert_eq!(
            structures[0]["canvases"],
            json!([format!("{}/canvas/0", WORK_ID)])
        );

        assert_eq!(structures[1]["@id"], format!("{}/range/r-1", WORK_ID));
        assert_eq!(structures[1]["label"], "Chapter 1");
        assert_eq!(
            structures[1]["canvases"],
            json!([format!("{}/canvas/1", WORK_ID), format!("{}/canvas/2", WORK_ID)])
        );
    }

    #[test]
    fn test_toc_unmapped_reference_drops_entry_keeps_index() {
        let meta = meta_from(
            r#"{"meta": [], "image_metadata": {},
                "toc": {"Good": [0], "Bad": [9], "Also good": [1]}}"#,
        );
        let mut manifest = rewritten_manifest(2);
        let map = build_canvas_map(&manifest).unwrap();

        decorate_toc(&meta, &mut manifest, &map, WORK_ID).unwrap();

        let structures = manifest["structures"].as_array().unwrap();
        assert_eq!(structures.len(), 2);
        assert_eq!(structures[0]["label"], "Good");
        // "Bad" consumed r-1, so the surviving entry keeps r-2.
        assert_eq!(structures[1]["label"], "Also good");
        assert_eq!(structures[1]["@id"], format!("{}/range/r-2", WORK_ID));
    }

    #[test]
    fn test_toc_empty_emits_empty_structures() {
        let meta = meta_from(r#"{"meta": [], "image_metadata": {}, "toc": {}}"#);
        let mut manifest = rewritten_manifest(1);
        let map = build_canvas_map(&manifest).unwrap();

        decorate_toc(&meta, &mut manifest, &map, WORK_ID).unwrap();
        assert_eq!(manifest["structures"], json!([]));
    }

    #[test]
    fn test_label_fallback_is_one_based_position() {
        let meta = meta_from(
            r#"{"meta": [], "image_metadata": {
                "0": [{"label": "Page", "value": "iv"}],
                "2": []
            }}"#,
        );
        let mut manifest = rewritten_manifest(3);

        decorate_image_metadata(&meta, &mut manifest).unwrap();

        let canvases = manifest["sequences"][0]["canvases"].as_array().unwrap();
        assert_eq!(canvases[0]["label"], "1");
        assert_eq!(canvases[2]["label"], "3");
        // Canvas 1 had no image metadata, so it was left alone.
        assert!(canvases[1].get("label").is_none());
    }

    #[test]
    fn test_label_selection_last_match_wins() {
        let meta = meta_from(
            r#"{"meta": [], "flags": {"Canvas_Label_Field": "Page"},
                "image_metadata": {
                    "0": [{"label": "Page", "value": "iv"}, {"label": "Page", "value": "v"}]
                }}"#,
        );
        let mut manifest = rewritten_manifest(1);

        decorate_image_metadata(&meta, &mut manifest).unwrap();
        assert_eq!(manifest["sequences"][0]["canvases"][0]["label"], "v");
    }

    #[test]
    fn test_label_selection_no_match_is_empty() {
        let meta = meta_from(
            r#"{"meta": [], "flags": {"Canvas_Label_Field": "Page"},
                "image_metadata": {
                    "0": [{"label": "Folio", "value": "12r"}]
                }}"#,
        );
        let mut manifest = rewritten_manifest(1);

        decorate_image_metadata(&meta, &mut manifest).unwrap();
        assert_eq!(manifest["sequences"][0]["canvases"][0]["label"], "");
    }

    #[test]
    fn test_image_metadata_copied_verbatim() {
        let meta = meta_from(
            r#"{"meta": [], "image_metadata": {
                "0": [{"label": "Page", "value": "iv", "lang": "la"}]
            }}"#,
        );
        let mut manifest = rewritten_manifest(1);

        decorate_image_metadata(&meta, &mut manifest).unwrap();
        assert_eq!(
            manifest["sequences"][0]["canvases"][0]["metadata"],
            json!([{"label": "Page", "value": "iv", "lang": "la"}])
        );
    }

    #[test]
    fn test_image_metadata_index_out_of_range_is_fatal() {
        let meta = meta_from(r#"{"meta": [], "image_metadata": {"5": []}}"#);
        let mut manifest = rewritten_manifest(2);

        let err = decorate_image_metadata(&meta, &mut manifest);
        assert!(matches!(
            err,
            Err(AppError::ImageMetadataIndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_image_metadata_non_numeric_index_is_fatal() {
        let meta = meta_from(r#"{"meta": [], "image_metadata": {"cover": []}}"#);
        let mut manifest = rewritten_manifest(2);

        let err = decorate_image_metadata(&meta, &mut manifest);
        assert!(matches!(err, Err(AppError::WorkMetadata(_))));
    }
}
