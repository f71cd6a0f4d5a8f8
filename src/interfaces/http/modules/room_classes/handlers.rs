use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{RoomClassDto, RoomClassRequest};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::interfaces::http::middleware::RequestGuard;
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/room-classes",
    tag = "Room Classes",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses((status = 200, description = "Newest first", body = PaginatedResponse<RoomClassDto>))
)]
pub async fn list_room_classes(
    State(state): State<AppState>,
    guard: RequestGuard,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<RoomClassDto>>, ApiError> {
    let page = state
        .services
        .room_classes
        .list(&guard, params.query(), params.page())
        .await
        .map_err(error_response)?;
    Ok(Json(PaginatedResponse::from_page(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/room-classes/options",
    tag = "Room Classes",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All classes by name", body = ApiResponse<Vec<RoomClassDto>>))
)]
pub async fn room_class_options(State(state): State<AppState>, guard: RequestGuard) -> ApiResult<Vec<RoomClassDto>> {
    let classes = state.services.room_classes.options(&guard).await.map_err(error_response)?;
    ok(classes.into_iter().map(RoomClassDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/room-classes/{id}",
    tag = "Room Classes",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Room class ID")),
    responses(
        (status = 200, description = "Room class", body = ApiResponse<RoomClassDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_room_class(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<RoomClassDto> {
    let class = state.services.room_classes.get(&guard, &id).await.map_err(error_response)?;
    ok(class.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/room-classes",
    tag = "Room Classes",
    security(("bearer_auth" = [])),
    request_body = RoomClassRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<RoomClassDto>),
        (status = 409, description = "Already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_room_class(
    State(state): State<AppState>,
    guard: RequestGuard,
    ValidatedJson(request): ValidatedJson<RoomClassRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RoomClassDto>>), ApiError> {
    let class = state
        .services
        .room_classes
        .create(&guard, request.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(class.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/room-classes/{id}",
    tag = "Room Classes",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Room class ID")),
    request_body = RoomClassRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<RoomClassDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_room_class(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<RoomClassRequest>,
) -> ApiResult<RoomClassDto> {
    let class = state
        .services
        .room_classes
        .update(&guard, &id, request.into())
        .await
        .map_err(error_response)?;
    ok(class.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/room-classes/{id}",
    tag = "Room Classes",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Room class ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_room_class(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.services.room_classes.delete(&guard, &id).await.map_err(error_response)?;
    ok(())
}
