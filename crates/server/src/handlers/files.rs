//! File record endpoints.

use crate::error::{ApiError, ApiResult};
use crate::handlers::common::{FileForm, FileQuery, ResponseFormat, parse_file_id};
use crate::metrics;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::Response;
use filecat_core::FileRecord;
use filecat_registry::RegistryError;

/// GET /files - List files, optionally filtered by exact field values.
pub async fn list_files(
    State(state): State<AppState>,
    FileQuery(filter): FileQuery,
    format: ResponseFormat,
) -> ApiResult<Response> {
    let files = if filter.is_empty() {
        state.registry.get_all().await
    } else {
        state.registry.find(&filter).await
    };

    format.records(&files)
}

/// GET /files/{id} - Get a single file.
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: ResponseFormat,
) -> ApiResult<Response> {
    let file_id = parse_file_id(&id)?;

    let file = state
        .registry
        .get(file_id)
        .await
        .ok_or_else(|| ApiError::file_not_found(&id))?;

    format.record(StatusCode::OK, &file)
}

/// POST /files - Add a file.
pub async fn create_file(
    State(state): State<AppState>,
    format: ResponseFormat,
    FileForm(file): FileForm,
) -> ApiResult<Response> {
    let file = state
        .registry
        .add(file)
        .await
        .inspect_err(|e| record_rejection(e, "add"))?;

    metrics::FILES_CREATED.inc();
    metrics::set_live_files(state.registry.len().await);
    tracing::info!(file_id = %file.id, filename = %file.file_name, "File created");

    let mut response = format.record(StatusCode::CREATED, &file)?;
    let location = HeaderValue::from_str(&format!("/files/{}", file.id))
        .map_err(|e| ApiError::Internal(format!("invalid location header: {e}")))?;
    response.headers_mut().insert(LOCATION, location);
    Ok(response)
}

/// PUT /files/{id} - Replace a file's fields.
pub async fn update_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    format: ResponseFormat,
    FileForm(file): FileForm,
) -> ApiResult<Response> {
    let file_id = parse_file_id(&id)?;

    let file = state
        .registry
        .update(FileRecord::with_fields(file_id, file))
        .await
        .inspect_err(|e| record_rejection(e, "update"))?;

    metrics::FILES_UPDATED.inc();
    tracing::info!(file_id = %file.id, filename = %file.file_name, "File updated");

    format.record(StatusCode::OK, &file)
}

/// DELETE /files/{id} - Delete a file.
///
/// Deleting is idempotent on the server side, but a request for an id that
/// is not there is still answered with 404.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let file_id = parse_file_id(&id)?;

    if state.registry.get(file_id).await.is_none() {
        return Err(ApiError::file_not_found(&id));
    }

    state.registry.delete(file_id).await;

    metrics::FILES_DELETED.inc();
    metrics::set_live_files(state.registry.len().await);
    tracing::info!(file_id = %file_id, "File deleted");

    Ok(StatusCode::NO_CONTENT)
}

fn record_rejection(err: &RegistryError, operation: &str) {
    if let RegistryError::Duplicate { file_name, hash } = err {
        metrics::record_duplicate(operation);
        tracing::debug!(%operation, filename = %file_name, %hash, "Duplicate file rejected");
    }
}
