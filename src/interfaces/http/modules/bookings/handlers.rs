use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{BookingDto, BookingRequest};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, ListParams, PaginatedResponse,
    ValidatedJson,
};
use crate::interfaces::http::middleware::RequestGuard;
use crate::interfaces::http::router::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses((status = 200, description = "Newest first; query matches room number or guest name", body = PaginatedResponse<BookingDto>))
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    guard: RequestGuard,
    Query(params): Query<ListParams>,
) -> Result<Json<PaginatedResponse<BookingDto>>, ApiError> {
    let page = state
        .services
        .bookings
        .list(&guard, params.query(), params.page())
        .await
        .map_err(error_response)?;
    Ok(Json(PaginatedResponse::from_page(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/options",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "All bookings by room number", body = ApiResponse<Vec<BookingDto>>))
)]
pub async fn booking_options(State(state): State<AppState>, guard: RequestGuard) -> ApiResult<Vec<BookingDto>> {
    let bookings = state.services.bookings.options(&guard).await.map_err(error_response)?;
    ok(bookings.into_iter().map(BookingDto::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<BookingDto> {
    let booking = state.services.bookings.get(&guard, &id).await.map_err(error_response)?;
    ok(booking.into())
}

#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    request_body = BookingRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<BookingDto>),
        (status = 409, description = "Already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    guard: RequestGuard,
    ValidatedJson(request): ValidatedJson<BookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingDto>>), ApiError> {
    let booking = state
        .services
        .bookings
        .create(&guard, request.into())
        .await
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(booking.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<BookingDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_booking(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<BookingRequest>,
) -> ApiResult<BookingDto> {
    let booking = state
        .services
        .bookings
        .update(&guard, &id, request.into())
        .await
        .map_err(error_response)?;
    ok(booking.into())
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{id}",
    tag = "Bookings",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Booking ID")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not found"))
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    guard: RequestGuard,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.services.bookings.delete(&guard, &id).await.map_err(error_response)?;
    ok(())
}
