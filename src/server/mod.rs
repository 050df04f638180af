// src/server/mod.rs
//! HTTP front end: upload a transcript, download or delete the meeting note.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::document::DOCX_MEDIA_TYPE;
use crate::pipeline::MeetingAnalyzer;
use crate::utils::AppError;

const DOWNLOAD_FILE_NAME: &str = "Meeting_note.docx";
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared handler state. `run_lock` serializes everything that writes the
/// single output file.
pub struct AppState {
    analyzer: MeetingAnalyzer,
    run_lock: Mutex<()>,
}

impl AppState {
    pub fn new(analyzer: MeetingAnalyzer) -> Self {
        Self {
            analyzer,
            run_lock: Mutex::new(()),
        }
    }
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct StatusResponse {
    response: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

fn error(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { detail: detail.into() })).into_response()
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/", get(read_root))
        .route("/api/uploadfile/", post(upload_file))
        .route("/api/downloadfile/", get(download_file))
        .route("/api/deletefile/", delete(delete_file))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: Arc<AppState>) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Meeting notes server listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down");
        })
        .await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Axum handlers
// ---------------------------------------------------------------------------

async fn read_root() -> Json<MessageResponse> {
    Json(MessageResponse { message: "Hello, World" })
}

async fn upload_file(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let mut upload: Option<Vec<u8>> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => match field.bytes().await {
                Ok(bytes) => upload = Some(bytes.to_vec()),
                Err(e) => {
                    tracing::warn!("Failed to read upload bytes: {}", e);
                    return error(StatusCode::BAD_REQUEST, "Failed to read file data.");
                }
            },
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("Malformed multipart body: {}", e);
                return error(StatusCode::BAD_REQUEST, format!("Malformed upload: {}", e));
            }
        }
    }

    let Some(bytes) = upload else {
        return error(StatusCode::BAD_REQUEST, "No file provided.");
    };
    let transcript = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(_) => return error(StatusCode::BAD_REQUEST, "Transcript must be UTF-8 text."),
    };

    let _guard = state.run_lock.lock().await;

    // The previous note goes first so a failed run never leaves a stale one.
    if let Err(e) = state.analyzer.storage().delete() {
        return error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("File upload failed: {}", e),
        );
    }

    match state.analyzer.complete(&transcript).await {
        Ok(path) => {
            tracing::info!("Meeting note ready at {}", path.display());
            Json(StatusResponse { response: "File uploaded successfully" }).into_response()
        }
        Err(e) => {
            tracing::error!("Pipeline run failed: {}", e);
            error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("File upload failed: {}", e),
            )
        }
    }
}

async fn download_file(State(state): State<Arc<AppState>>) -> Response {
    let path = state.analyzer.output_path();
    match tokio::fs::read(path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, DOCX_MEDIA_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            error(StatusCode::NOT_FOUND, "File not found")
        }
        Err(e) => error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("File download failed: {}", e),
        ),
    }
}

async fn delete_file(State(state): State<Arc<AppState>>) -> Response {
    let _guard = state.run_lock.lock().await;
    match state.analyzer.storage().delete() {
        Ok(true) => Json(StatusResponse { response: "File deleted successfully" }).into_response(),
        Ok(false) => Json(StatusResponse { response: "File not found" }).into_response(),
        Err(e) => error(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("File deletion failed: {}", e),
        ),
    }
}
