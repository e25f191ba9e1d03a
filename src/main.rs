//! Folio Server
//!
//! An HTTP service that serves enriched presentation manifests for digitized
//! works, backed by an S3-compatible object store used as a read-through
//! cache.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_server::config::Config;
use folio_server::manifest::ManifestService;
use folio_server::routes;
use folio_server::source::{self, HttpFetcher};
use folio_server::state::AppState;
use folio_server::storage::S3Client;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting Folio Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("S3 endpoint: {}", config.storage.endpoint);
    tracing::info!("S3 bucket: {}", config.storage.bucket);
    tracing::info!("Source parser: {}", config.source.parser);
    tracing::info!("Public base URL: {}", config.server.public_base_url);

    // Initialize the store, source parser and upstream fetcher
    let s3_client = S3Client::new(&config.storage)
        .await
        .expect("Failed to initialize S3 client");

    let parser = source::create_parser(&config.source)
        .expect("Failed to select source parser");

    let fetcher = HttpFetcher::new().expect("Failed to initialize HTTP client");

    let service = ManifestService::new(
        Arc::new(s3_client),
        parser,
        Arc::new(fetcher),
        config.server.public_base_url.clone(),
    );

    let state = AppState::new(config.clone(), service);
    let app = routes::app(state);

    // Start server with graceful shutdown
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .expect("Invalid server address");
    tracing::info!("Folio Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    tracing::info!("Server shutdown complete");
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
