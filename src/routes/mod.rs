//! HTTP route registration

pub mod collection;
pub mod health;
pub mod work;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/health", health::router())
        .nest("/work", work::router())
        .nest("/collection", collection::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
