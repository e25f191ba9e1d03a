//! Error types for the Folio server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("S3 error: {0}")]
    Storage(#[from] StorageError),

    /// No `work-<reference>` record exists for the requested work.
    #[error("Work metadata not found: {0}")]
    MetadataNotFound(String),

    /// The upstream manifest source answered with a non-success status
    /// or could not be reached at all.
    #[error("Upstream manifest fetch failed: {0}")]
    UpstreamFetch(String),

    /// A stored `work-<reference>` record does not have the expected shape.
    #[error("Malformed work metadata: {0}")]
    WorkMetadata(String),

    /// The fetched manifest does not have the expected shape.
    #[error("Unexpected manifest shape: {0}")]
    ManifestShape(String),

    /// An `image_metadata` entry addresses a canvas past the end of the
    /// sequence.
    #[error("Image metadata index {index} out of range for {len} canvases")]
    ImageMetadataIndexOutOfRange { index: usize, len: usize },

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("S3 connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("S3 SDK error: {0}")]
    SdkError(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                match e {
                    StorageError::ObjectNotFound(key) => (
                        StatusCode::NOT_FOUND,
                        "not_found",
                        format!("Object not found: {}", key),
                    ),
                    _ => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "storage_error",
                        "Storage error".to_string(),
                    ),
                }
            }
            AppError::MetadataNotFound(reference) => {
                tracing::error!("Work metadata not found: {}", reference);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "metadata_not_found",
                    "Work metadata not found".to_string(),
                )
            }
            AppError::UpstreamFetch(e) => {
                tracing::error!("Upstream manifest fetch failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "upstream_fetch_failed",
                    "Failed to fetch manifest from source".to_string(),
                )
            }
            AppError::WorkMetadata(e) => {
                tracing::error!("Malformed work metadata: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "bad_work_metadata",
                    "Stored work metadata is malformed".to_string(),
                )
            }
            AppError::ManifestShape(e) => {
                tracing::error!("Unexpected manifest shape: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "bad_manifest",
                    "Fetched manifest has an unexpected shape".to_string(),
                )
            }
            AppError::ImageMetadataIndexOutOfRange { index, len } => {
                tracing::error!("Image metadata index {} out of range ({} canvases)", index, len);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "bad_work_metadata",
                    "Image metadata references a missing canvas".to_string(),
                )
            }
            AppError::Serialization(e) => {
                tracing::error!("JSON error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "serialization_error",
                    "Failed to process manifest JSON".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
