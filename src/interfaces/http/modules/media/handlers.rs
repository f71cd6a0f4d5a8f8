use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use super::dto::{MediaDto, MediaMetadataRequest, UploadForm};
use crate::application::access::require_principal;
use crate::application::services::Upload;
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::interfaces::http::middleware::RequestGuard;
use crate::interfaces::http::router::AppState;

const FILE_FIELD: &str = "file";

fn reject(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ApiResponse::error(message)))
}

#[utoipa::path(
    get,
    path = "/api/v1/media",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses((status = 200, description = "Newest first; query matches file name or alt text", body = PaginatedResponse<MediaDto>))
)]
pub async fn list_media(
    State(state): State<AppState>,
    guard: RequestGuard,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<MediaDto>>, ApiError> {
    let page = state
        .services
        .media
        .list(&guard, params.query(), params.page())
        .await
        .map_err(error_response)?;
    Ok(Json(PaginatedResponse::from_page(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/media/options",
    tag = "Media",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All media by file name", body = ApiResponse<Vec<MediaDto>>))
)]
pub async fn media_options(State(state): State<AppState>, guard: RequestGuard) -> ApiResult<Vec<MediaDto>> {
    let items = state.services.media.options(&guard).await.map_err(error_response)?;
    ok(items.into_iter().map(MediaDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/media/{id}",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Media ID")),
    responses(
        (status = 200, description = "Media item", body = ApiResponse<MediaDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_media(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<MediaDto> {
    let media = state.services.media.get(&guard, &id).await.map_err(error_response)?;
    ok(media.into())
}

/// Reads the `file` field; other fields are ignored.
#[utoipa::path(
    post,
    path = "/api/v1/media",
    tag = "Media",
    security(("bearer_auth" = [])),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Uploaded", body = ApiResponse<MediaDto>),
        (status = 401, description = "Unauthorized"),
        (status = 413, description = "File too large"),
        (status = 422, description = "No file uploaded")
    )
)]
pub async fn upload_media(
    State(state): State<AppState>,
    guard: RequestGuard,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<MediaDto>>), ApiError> {
    require_principal(&guard).await.map_err(error_response)?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| reject(e.status(), e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            debug!(field = ?field.name(), "ignoring multipart field");
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| reject(e.status(), e.body_text()))?;
        upload = Some(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let Some(upload) = upload else {
        return Err(reject(StatusCode::UNPROCESSABLE_ENTITY, "No file uploaded"));
    };
    if upload.bytes.len() > state.max_upload_bytes {
        return Err(reject(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("File exceeds {} bytes", state.max_upload_bytes),
        ));
    }

    let media = state
        .services
        .media
        .upload(&guard, upload)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(media.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/media/{id}",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Media ID")),
    request_body = MediaMetadataRequest,
    responses(
        (status = 200, description = "Metadata updated", body = ApiResponse<MediaDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_media(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<MediaMetadataRequest>,
) -> ApiResult<MediaDto> {
    let media = state
        .services
        .media
        .update_metadata(&guard, &id, request.into())
        .await
        .map_err(error_response)?;
    ok(media.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/media/{id}",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Media ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_media(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.services.media.delete(&guard, &id).await.map_err(error_response)?;
    ok(())
}

#[utoipa::path(
    get,
    path = "/api/v1/media/{id}/next",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Media ID")),
    responses((status = 200, description = "Next older item, null at the end", body = ApiResponse<Option<MediaDto>>))
)]
pub async fn next_media(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<Option<MediaDto>> {
    let media = state.services.media.next(&guard, &id).await.map_err(error_response)?;
    ok(media.map(MediaDto::from))
}

#[utoipa::path(
    get,
    path = "/api/v1/media/{id}/previous",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Media ID")),
    responses((status = 200, description = "Next newer item, null at the start", body = ApiResponse<Option<MediaDto>>))
)]
pub async fn previous_media(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<Option<MediaDto>> {
    let media = state
        .services
        .media
        .previous(&guard, &id)
        .await
        .map_err(error_response)?;
    ok(media.map(MediaDto::from))
}
