use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::addon::{Addon, AddonDraft};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddonDto {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Addon> for AddonDto {
    fn from(a: Addon) -> Self {
        Self {
            id: a.id,
            name: a.name,
            slug: a.slug,
            price: a.price,
            created_at: a.audit.created_at,
            updated_at: a.audit.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddonRequest {
    #[validate(length(min = 3, max = 100, message = "must be 3–100 characters"))]
    pub name: String,
    /// Two decimal places, 0..=10000
    pub price: Decimal,
}

impl From<AddonRequest> for AddonDraft {
    fn from(r: AddonRequest) -> Self {
        AddonDraft {
            name: r.name,
            price: r.price,
        }
    }
}
