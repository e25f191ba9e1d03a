//! Identifier rewriting and canvas indexing
//!
//! Rewrites every self-referential identifier in a manifest to be relative
//! to the work's public URL. Identifiers are positional, so two fills of the
//! same work always agree.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{AppError, Result};

/// Checked access to `sequences[0].canvases`.
pub(crate) fn canvases(manifest: &Value) -> Result<&Vec<Value>> {
    manifest
        .get("sequences")
        .and_then(|s| s.get(0))
        .and_then(|s| s.get("canvases"))
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::ManifestShape("sequences[0].canvases missing".to_string()))
}

pub(crate) fn canvases_mut(manifest: &mut Value) -> Result<&mut Vec<Value>> {
    manifest
        .get_mut("sequences")
        .and_then(|s| s.get_mut(0))
        .and_then(|s| s.get_mut("canvases"))
        .and_then(Value::as_array_mut)
        .ok_or_else(|| AppError::ManifestShape("sequences[0].canvases missing".to_string()))
}

/// Rewrite all self-referential identifiers against `work_id`.
///
/// Canvas `i` becomes `<work_id>/canvas/<i>` (zero-based) and every image
/// under it has its `on` back-reference pointed at the new canvas id.
pub fn rewrite_identifiers(manifest: &mut Value, work_id: &str) -> Result<()> {
    let root = manifest
        .as_object_mut()
        .ok_or_else(|| AppError::ManifestShape("manifest root is not an object".to_string()))?;
    root.insert("@id".to_string(), Value::String(work_id.to_string()));

    let sequence = root
        .get_mut("sequences")
        .and_then(|s| s.get_mut(0))
        .and_then(Value::as_object_mut)
        .ok_or_else(|| AppError::ManifestShape("sequences[0] missing".to_string()))?;
    sequence.insert(
        "@id".to_string(),
        Value::String(format!("{}/sequences/0", work_id)),
    );

    let canvases = sequence
        .get_mut("canvases")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| AppError::ManifestShape("sequences[0].canvases missing".to_string()))?;

    for (index, canvas) in canvases.iter_mut().enumerate() {
        let canvas_id = format!("{}/canvas/{}", work_id, index);
        let canvas = canvas.as_object_mut().ok_or_else(|| {
            AppError::ManifestShape(format!("canvas {} is not an object", index))
        })?;
        canvas.insert("@id".to_string(), Value::String(canvas_id.clone()));

        // A canvas with no images has nothing to re-point.
        if let Some(images) = canvas.get_mut("images").and_then(Value::as_array_mut) {
            for image in images {
                if let Some(image) = image.as_object_mut() {
                    image.insert("on".to_string(), Value::String(canvas_id.clone()));
                }
            }
        }
    }

    Ok(())
}

/// Build the position -> identifier mapping over the canvas list.
///
/// Must run after [`rewrite_identifiers`] so the map reflects final ids.
pub fn build_canvas_map(manifest: &Value) -> Result<HashMap<usize, String>> {
    let canvases = canvases(manifest)?;
    let mut mapping = HashMap::with_capacity(canvases.len());

    for (index, canvas) in canvases.iter().enumerate() {
        let id = canvas
            .get("@id")
            .and_then(Value::as_str)
            .ok_or_else(|| AppError::ManifestShape(format!("canvas {} has no @id", index)))?;
        mapping.insert(index, id.to_string());
    }

    Ok(mapping)
}
