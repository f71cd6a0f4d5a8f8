use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{AddonDto, AddonRequest};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::interfaces::http::middleware::RequestGuard;
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/addons",
    tag = "Add-ons",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses((status = 200, description = "Newest first", body = PaginatedResponse<AddonDto>))
)]
pub async fn list_addons(
    State(state): State<AppState>,
    guard: RequestGuard,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<AddonDto>>, ApiError> {
    let page = state
        .services
        .addons
        .list(&guard, params.query(), params.page())
        .await
        .map_err(error_response)?;
    Ok(Json(PaginatedResponse::from_page(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/addons/options",
    tag = "Add-ons",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All add-ons by name", body = ApiResponse<Vec<AddonDto>>))
)]
pub async fn addon_options(State(state): State<AppState>, guard: RequestGuard) -> ApiResult<Vec<AddonDto>> {
    let addons = state.services.addons.options(&guard).await.map_err(error_response)?;
    ok(addons.into_iter().map(AddonDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/addons/{id}",
    tag = "Add-ons",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Add-on ID")),
    responses(
        (status = 200, description = "Add-on", body = ApiResponse<AddonDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_addon(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<AddonDto> {
    let addon = state.services.addons.get(&guard, &id).await.map_err(error_response)?;
    ok(addon.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/addons",
    tag = "Add-ons",
    security(("bearer_auth" = [])),
    request_body = AddonRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<AddonDto>),
        (status = 409, description = "Already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_addon(
    State(state): State<AppState>,
    guard: RequestGuard,
    ValidatedJson(request): ValidatedJson<AddonRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AddonDto>>), ApiError> {
    let addon = state
        .services
        .addons
        .create(&guard, request.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(addon.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/addons/{id}",
    tag = "Add-ons",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Add-on ID")),
    request_body = AddonRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<AddonDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_addon(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AddonRequest>,
) -> ApiResult<AddonDto> {
    let addon = state
        .services
        .addons
        .update(&guard, &id, request.into())
        .await
        .map_err(error_response)?;
    ok(addon.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/addons/{id}",
    tag = "Add-ons",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Add-on ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_addon(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.services.addons.delete(&guard, &id).await.map_err(error_response)?;
    ok(())
}
