//! File handlers for the Web API.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::file::FileCategory;
use crate::web::dto::{ApiResponse, FileResponse, FileSummary, ListQuery, RenameRequest};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::AuthUser;

/// Multipart field carrying the uploaded file.
const UPLOAD_FIELD: &str = "file";

/// POST /api/files/upload - Upload a file.
///
/// Expects a multipart body with a `file` field. The declared content type
/// drives classification; when the client omits one it is guessed from the
/// filename.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<FileResponse>>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let original_name = field
            .file_name()
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unnamed".to_string());
        let content_type = match field.content_type() {
            Some(ct) => ct.to_string(),
            None => mime_guess::from_path(&original_name)
                .first_or_octet_stream()
                .to_string(),
        };
        let content = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {}", e)))?;

        let record = state
            .files
            .upload(user_id, &content, &original_name, &content_type)
            .await?;

        return Ok((StatusCode::CREATED, Json(ApiResponse::new(record.into()))));
    }

    Err(ApiError::bad_request("no file provided"))
}

/// Shared listing logic for the category routes.
async fn list_category(
    state: &AppState,
    user_id: i64,
    category: FileCategory,
    query: &ListQuery,
) -> Result<Json<ApiResponse<Vec<FileSummary>>>, ApiError> {
    let records = state
        .files
        .list(user_id, category, query.page(), query.limit())
        .await?;

    let summaries = records.into_iter().map(FileSummary::from).collect();
    Ok(Json(ApiResponse::new(summaries)))
}

/// GET /api/files/images - List the caller's images.
pub async fn list_images(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<FileSummary>>>, ApiError> {
    list_category(&state, user_id, FileCategory::Image, &query).await
}

/// GET /api/files/document - List the caller's documents.
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<FileSummary>>>, ApiError> {
    list_category(&state, user_id, FileCategory::Document, &query).await
}

/// GET /api/files/videos - List the caller's video and audio files.
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<FileSummary>>>, ApiError> {
    list_category(&state, user_id, FileCategory::VideoOrAudio, &query).await
}

/// GET /api/files/other - List the caller's uncategorized files.
pub async fn list_others(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<FileSummary>>>, ApiError> {
    list_category(&state, user_id, FileCategory::Other, &query).await
}

/// PATCH /api/files/:id/rename - Rename a file.
pub async fn rename(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(file_id): Path<i64>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<ApiResponse<FileResponse>>, ApiError> {
    let record = state.files.rename(user_id, file_id, &req.new_name).await?;
    Ok(Json(ApiResponse::new(record.into())))
}

/// DELETE /api/files/:id - Delete a file.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(file_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.files.delete(user_id, file_id).await?;
    Ok(Json(ApiResponse::new(())))
}
