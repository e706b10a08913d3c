//! File upload routes.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde::Serialize;
use tracing::{error, info};

use crate::AppState;
use depot_core::storage::UploadRequest;

/// Creates the file routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/files", post(upload_file))
}

/// Response body for an upload attempt.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Whether the file was stored.
    pub success: bool,
    /// Human-readable status description.
    pub message: String,
    /// Original filename, when one was received.
    pub filename: Option<String>,
}

/// POST `/files`
/// Accept one multipart file field named `file` and store it in the bucket.
async fn upload_file(State(state): State<AppState>, mut multipart: Multipart) -> impl IntoResponse {
    info!("Receiving file upload");

    let file = match read_file_field(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(UploadResponse {
                    success: false,
                    message: "Missing 'file' field in multipart request".to_string(),
                    filename: None,
                }),
            );
        }
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(UploadResponse {
                    success: false,
                    message,
                    filename: None,
                }),
            );
        }
    };

    let filename = file.filename.clone();
    match state.storage.upload(file).await {
        Ok(()) => {
            info!(filename = %filename, "File uploaded");
            (
                StatusCode::OK,
                Json(UploadResponse {
                    success: true,
                    message: "File uploaded successfully".to_string(),
                    filename: Some(filename),
                }),
            )
        }
        Err(e) => {
            error!(error = %e, filename = %filename, "Failed to upload file");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UploadResponse {
                    success: false,
                    message: format!("File upload failed: {e}"),
                    filename: Some(filename),
                }),
            )
        }
    }
}

/// Pull the `file` field out of the multipart body.
///
/// Returns `Ok(None)` when the body carries no `file` field, and `Err` with
/// a client-facing message when the body cannot be read.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadRequest>, String> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Invalid multipart request: {e}"))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err("File field is missing a filename".to_string());
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| format!("Invalid multipart request: {e}"))?;

        return Ok(Some(UploadRequest {
            filename,
            content_type,
            size: u64::try_from(data.len()).unwrap_or(u64::MAX),
            bytes: data,
        }));
    }

    Ok(None)
}
