//! Authentication API handlers

use axum::{extract::State, Json};

use super::dto::{LoginRequest, LoginResponse, PrincipalDto};
use crate::application::access::require_principal;
use crate::interfaces::http::common::{error_response, ok, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::RequestGuard;
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let auth = state
        .services
        .users
        .login(&request.email, &request.password)
        .await
        .map_err(error_response)?;

    ok(LoginResponse {
        token: auth.token,
        token_type: auth.token_type,
        expires_in: auth.expires_in,
        user: auth.user.into(),
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current principal", body = ApiResponse<PrincipalDto>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_user(guard: RequestGuard) -> ApiResult<PrincipalDto> {
    let principal = require_principal(&guard).await.map_err(error_response)?;
    ok(principal.into())
}
