//! Collection routes
//!
//! Reserved: collection manifests are not implemented yet.

use axum::{extract::Path, http::StatusCode, routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/:collection_reference", get(get_collection))
}

async fn get_collection(Path(_collection_reference): Path<String>) -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}
