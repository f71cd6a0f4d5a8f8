use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{FloorDto, FloorRequest};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::interfaces::http::middleware::RequestGuard;
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/floors",
    tag = "Floors",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses((status = 200, description = "Newest first", body = PaginatedResponse<FloorDto>))
)]
pub async fn list_floors(
    State(state): State<AppState>,
    guard: RequestGuard,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<FloorDto>>, ApiError> {
    let page = state
        .services
        .floors
        .list(&guard, params.query(), params.page())
        .await
        .map_err(error_response)?;
    Ok(Json(PaginatedResponse::from_page(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/floors/options",
    tag = "Floors",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All floors, lowest first", body = ApiResponse<Vec<FloorDto>>))
)]
pub async fn floor_options(State(state): State<AppState>, guard: RequestGuard) -> ApiResult<Vec<FloorDto>> {
    let floors = state.services.floors.options(&guard).await.map_err(error_response)?;
    ok(floors.into_iter().map(FloorDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/floors/{id}",
    tag = "Floors",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Floor ID")),
    responses(
        (status = 200, description = "Floor", body = ApiResponse<FloorDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_floor(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<FloorDto> {
    let floor = state.services.floors.get(&guard, &id).await.map_err(error_response)?;
    ok(floor.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/floors",
    tag = "Floors",
    security(("bearer_auth" = [])),
    request_body = FloorRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<FloorDto>),
        (status = 409, description = "Already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_floor(
    State(state): State<AppState>,
    guard: RequestGuard,
    ValidatedJson(request): ValidatedJson<FloorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FloorDto>>), ApiError> {
    let floor = state
        .services
        .floors
        .create(&guard, request.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(floor.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/floors/{id}",
    tag = "Floors",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Floor ID")),
    request_body = FloorRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<FloorDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_floor(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<FloorRequest>,
) -> ApiResult<FloorDto> {
    let floor = state
        .services
        .floors
        .update(&guard, &id, request.into())
        .await
        .map_err(error_response)?;
    ok(floor.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/floors/{id}",
    tag = "Floors",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Floor ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_floor(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.services.floors.delete(&guard, &id).await.map_err(error_response)?;
    ok(())
}
