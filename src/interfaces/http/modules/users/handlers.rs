//! User management API handlers
//!
//! Admins manage everyone; other users may edit their own profile.
//! Delegates to `UserService`.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{UserDto, UserRequest};
use crate::domain::user::UserDraft;
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::interfaces::http::middleware::RequestGuard;
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses((status = 200, description = "User list", body = PaginatedResponse<UserDto>))
)]
pub async fn list_users(
    State(state): State<AppState>,
    guard: RequestGuard,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<UserDto>>, ApiError> {
    let page = state
        .services
        .users
        .list(&guard, params.query(), params.page())
        .await
        .map_err(error_response)?;
    Ok(Json(PaginatedResponse::from_page(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/guests",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses((status = 200, description = "Users with the guest role", body = PaginatedResponse<UserDto>))
)]
pub async fn list_guests(
    State(state): State<AppState>,
    guard: RequestGuard,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<UserDto>>, ApiError> {
    let page = state
        .services
        .users
        .guests(&guard, params.query(), params.page())
        .await
        .map_err(error_response)?;
    Ok(Json(PaginatedResponse::from_page(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/options",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All users by name", body = ApiResponse<Vec<UserDto>>))
)]
pub async fn user_options(State(state): State<AppState>, guard: RequestGuard) -> ApiResult<Vec<UserDto>> {
    let users = state.services.users.options(&guard).await.map_err(error_response)?;
    ok(users.into_iter().map(UserDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<UserDto> {
    let user = state.services.users.get(&guard, &id).await.map_err(error_response)?;
    ok(user.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 403, description = "Admins only"),
        (status = 409, description = "Email already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    guard: RequestGuard,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let draft = UserDraft::try_from(request).map_err(error_response)?;
    let user = state
        .services
        .users
        .create(&guard, draft)
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 403, description = "Not your profile"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> ApiResult<UserDto> {
    let draft = UserDraft::try_from(request).map_err(error_response)?;
    let user = state
        .services
        .users
        .update(&guard, &id, draft)
        .await
        .map_err(error_response)?;
    ok(user.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 403, description = "Admins only"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.services.users.delete(&guard, &id).await.map_err(error_response)?;
    ok(())
}
