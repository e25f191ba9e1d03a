//! Work manifest routes

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::error::Result;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/:manifest_reference", get(get_manifest_for_work))
}

/// Serve the decorated manifest for a work.
///
/// The optional `.manifest` suffix on the reference is stripped before it
/// becomes the cache key root.
async fn get_manifest_for_work(
    State(state): State<AppState>,
    Path(manifest_reference): Path<String>,
) -> Result<Response> {
    tracing::debug!("Request received for manifest reference: {}", manifest_reference);

    let work_reference = manifest_reference
        .strip_suffix(".manifest")
        .unwrap_or(&manifest_reference);

    let body = state
        .manifest_service()
        .get_decorated_manifest(work_reference)
        .await?;

    Ok((
        [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
        body,
    )
        .into_response())
}
