use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::catalog::{CatalogDraft, CatalogEntry};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntryDto {
    pub id: String,
    /// `bed_type`, `feature`, `payment_status` or `room_status`
    pub kind: String,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CatalogEntry> for CatalogEntryDto {
    fn from(e: CatalogEntry) -> Self {
        Self {
            id: e.id,
            kind: e.kind.as_str().to_string(),
            name: e.name,
            slug: e.slug,
            created_at: e.audit.created_at,
            updated_at: e.audit.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CatalogRequest {
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
}

impl From<CatalogRequest> for CatalogDraft {
    fn from(r: CatalogRequest) -> Self {
        CatalogDraft { name: r.name }
    }
}
