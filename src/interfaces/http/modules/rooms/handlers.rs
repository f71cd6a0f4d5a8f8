use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{ReorderImagesRequest, RoomDto, RoomRequest};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::interfaces::http::middleware::RequestGuard;
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses((status = 200, description = "Newest first; query matches number, class or status", body = PaginatedResponse<RoomDto>))
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    guard: RequestGuard,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<RoomDto>>, ApiError> {
    let page = state
        .services
        .rooms
        .list(&guard, params.query(), params.page())
        .await
        .map_err(error_response)?;
    Ok(Json(PaginatedResponse::from_page(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/options",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All rooms by number", body = ApiResponse<Vec<RoomDto>>))
)]
pub async fn room_options(State(state): State<AppState>, guard: RequestGuard) -> ApiResult<Vec<RoomDto>> {
    let rooms = state.services.rooms.options(&guard).await.map_err(error_response)?;
    ok(rooms.into_iter().map(RoomDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room", body = ApiResponse<RoomDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_room(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<RoomDto> {
    let room = state.services.rooms.get(&guard, &id).await.map_err(error_response)?;
    ok(room.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    request_body = RoomRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<RoomDto>),
        (status = 409, description = "Already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_room(
    State(state): State<AppState>,
    guard: RequestGuard,
    ValidatedJson(request): ValidatedJson<RoomRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomDto>>), ApiError> {
    let room = state
        .services
        .rooms
        .create(&guard, request.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(room.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Room ID")),
    request_body = RoomRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<RoomDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_room(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<RoomRequest>,
) -> ApiResult<RoomDto> {
    let room = state
        .services
        .rooms
        .update(&guard, &id, request.into())
        .await
        .map_err(error_response)?;
    ok(room.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/rooms/{id}",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Room ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_room(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.services.rooms.delete(&guard, &id).await.map_err(error_response)?;
    ok(())
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/images/reorder",
    tag = "Rooms",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Room ID")),
    request_body = ReorderImagesRequest,
    responses(
        (status = 200, description = "Images reordered", body = ApiResponse<RoomDto>),
        (status = 404, description = "Not found"),
        (status = 422, description = "Index out of range")
    )
)]
pub async fn reorder_room_images(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ReorderImagesRequest>,
) -> ApiResult<RoomDto> {
    let room = state
        .services
        .rooms
        .reorder_images(&guard, &id, request.from, request.to)
        .await
        .map_err(error_response)?;
    ok(room.into())
}
