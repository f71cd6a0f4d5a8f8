//! The four lookup tables share these handlers; the router attaches the
//! table's `CatalogKind` as a request extension.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CatalogEntryDto, CatalogRequest};
use crate::application::services::CatalogService;
use crate::domain::catalog::CatalogKind;
use crate::domain::DomainError;
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::interfaces::http::middleware::RequestGuard;
use crate::interfaces::http::router::AppState;

fn service(state: &AppState, kind: CatalogKind) -> Result<Arc<CatalogService>, ApiError> {
    state.services.catalog(kind).ok_or_else(|| {
        error_response(DomainError::Storage(format!(
            "no service registered for {}",
            kind.as_str()
        )))
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/{catalog}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(
        ("catalog" = String, Path, description = "bed-types, features, payment-statuses or room-statuses"),
        ListParams
    ),
    responses(
        (status = 200, description = "One page of entries; empty when unauthenticated", body = PaginatedResponse<CatalogEntryDto>)
    )
)]
pub async fn list_entries(
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    guard: RequestGuard,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<CatalogEntryDto>>, ApiError> {
    let page = service(&state, kind)?
        .list(&guard, params.query(), params.page())
        .await
        .map_err(error_response)?;
    Ok(Json(PaginatedResponse::from_page(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/{catalog}/options",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("catalog" = String, Path, description = "Lookup table")),
    responses((status = 200, description = "All entries, by name", body = ApiResponse<Vec<CatalogEntryDto>>))
)]
pub async fn entry_options(
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    guard: RequestGuard,
) -> ApiResult<Vec<CatalogEntryDto>> {
    let entries = service(&state, kind)?
        .options(&guard)
        .await
        .map_err(error_response)?;
    ok(entries.into_iter().map(CatalogEntryDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/{catalog}/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(
        ("catalog" = String, Path, description = "Lookup table"),
        ("id" = String, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry", body = ApiResponse<CatalogEntryDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_entry(
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<CatalogEntryDto> {
    let entry = service(&state, kind)?
        .get(&guard, &id)
        .await
        .map_err(error_response)?;
    ok(entry.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/{catalog}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(("catalog" = String, Path, description = "Lookup table")),
    request_body = CatalogRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<CatalogEntryDto>),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_entry(
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    guard: RequestGuard,
    ValidatedJson(request): ValidatedJson<CatalogRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CatalogEntryDto>>), ApiError> {
    let entry = service(&state, kind)?
        .create(&guard, request.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(entry.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/{catalog}/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(
        ("catalog" = String, Path, description = "Lookup table"),
        ("id" = String, Path, description = "Entry ID")
    ),
    request_body = CatalogRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<CatalogEntryDto>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Already exists")
    )
)]
pub async fn update_entry(
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    guard: RequestGuard,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<CatalogRequest>,
) -> ApiResult<CatalogEntryDto> {
    let entry = service(&state, kind)?
        .update(&guard, &id, request.into())
        .await
        .map_err(error_response)?;
    ok(entry.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/{catalog}/{id}",
    tag = "Catalog",
    security(("bearer_auth" = [])),
    params(
        ("catalog" = String, Path, description = "Lookup table"),
        ("id" = String, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_entry(
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<()> {
    service(&state, kind)?
        .delete(&guard, &id)
        .await
        .map_err(error_response)?;
    ok(())
}
