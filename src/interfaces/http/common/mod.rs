//! Response envelope, list parameters and error mapping shared by every
//! handler.

mod validated_json;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::{IntoParams, ToSchema};

use crate::shared::{coerce_page, DomainError, PageResult};

/// Standard API response wrapper.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "data": null, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// One page of a list view.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    /// Matching records; page-local on filtered searches unless the
    /// global count is enabled.
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    /// "1–10 of 25", absent on an empty page.
    pub showing: Option<String>,
    /// "Page 1 of 3"
    pub page_label: String,
}

impl<T> PaginatedResponse<T> {
    pub fn from_page<R>(page: PageResult<R>) -> Self
    where
        T: From<R>,
    {
        let showing = page.range().map(|r| r.to_string());
        let page_label = page.page_label();
        Self {
            items: page.items.into_iter().map(T::from).collect(),
            total: page.total_matching,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.page_count,
            showing,
            page_label,
        }
    }
}

/// `?query=&page=` for list endpoints.
///
/// `page` stays a string so garbage coerces to page 1 instead of a 400.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Case-insensitive substring filter
    pub query: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
}

impl ListParams {
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or_default()
    }

    pub fn page(&self) -> u32 {
        coerce_page(self.page.as_deref())
    }
}

pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

pub fn status_for(e: &DomainError) -> StatusCode {
    match e {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Database(_) | DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a domain error to the JSON error envelope. Server-side failures are
/// logged here and reported without their details.
pub fn error_response(e: DomainError) -> ApiError {
    let status = status_for(&e);
    let message = match &e {
        DomainError::Validation(m)
        | DomainError::Conflict(m)
        | DomainError::Unauthorized(m)
        | DomainError::Forbidden(m) => m.clone(),
        DomainError::NotFound { .. } => e.to_string(),
        DomainError::Database(_) | DomainError::Storage(_) => {
            error!(error = %e, "request failed");
            "Internal server error".to_string()
        }
    };
    (status, Json(ApiResponse::error(message)))
}

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok(Json(ApiResponse::success(data)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::PageRequest;

    #[test]
    fn paginated_response_carries_labels() {
        let request = PageRequest::new("", 3, 10);
        let page = PageResult::new((21..=25).collect::<Vec<u32>>(), 25, &request);
        let response: PaginatedResponse<u64> = PaginatedResponse::from_page(page);

        assert_eq!(response.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.showing.as_deref(), Some("21–25 of 25"));
        assert_eq!(response.page_label, "Page 3 of 3");
    }

    #[test]
    fn empty_page_has_no_showing() {
        let request = PageRequest::new("x", 1, 10);
        let response: PaginatedResponse<u32> =
            PaginatedResponse::from_page(PageResult::<u32>::empty(&request));
        assert!(response.showing.is_none());
        assert_eq!(response.page_label, "Page 1 of 1");
    }

    #[test]
    fn lenient_page_param() {
        let params = ListParams {
            query: None,
            page: Some("abc".into()),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.query(), "");
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (DomainError::not_found("Room", "x"), StatusCode::NOT_FOUND),
            (DomainError::Validation("bad".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::Conflict("dup".into()), StatusCode::CONFLICT),
            (DomainError::not_authorized(), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (DomainError::Database("gone".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(err).0, status);
        }
    }

    #[test]
    fn internal_details_are_hidden() {
        let (_, Json(body)) = error_response(DomainError::Database("disk on fire".into()));
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }
}
