//! Upload and analysis handler.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
};
use datalens::{AnalysisReport, DatalensError};
use tracing::debug;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Multipart part carrying the upload.
const FILE_FIELD: &str = "file";

/// Profile an uploaded CSV file.
///
/// Expects a multipart body with the file under the `file` part.
/// Profiling runs on the blocking pool because a narrative provider may
/// make a synchronous network call.
pub async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    // A request that is not multipart carries no file.
    let mut multipart = multipart.map_err(|_| DatalensError::MissingFile)?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(read_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(read_error)?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) = upload.ok_or(DatalensError::MissingFile)?;
    debug!(file = %filename, bytes = bytes.len(), "received upload");

    let lens = Arc::clone(&state.lens);
    let result = tokio::task::spawn_blocking(move || lens.analyze_bytes(&bytes, &filename))
        .await
        .map_err(worker_error)??;

    Ok(Json(result.report()))
}

fn worker_error(err: tokio::task::JoinError) -> DatalensError {
    DatalensError::Internal(format!("analysis task failed: {}", err))
}

fn read_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}
