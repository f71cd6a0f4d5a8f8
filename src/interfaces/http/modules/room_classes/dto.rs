use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::room_class::{BedTypeLine, RoomClass, RoomClassDraft};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BedTypeLineDto {
    pub bed_type_id: String,
    pub num_beds: i32,
}

impl From<BedTypeLine> for BedTypeLineDto {
    fn from(l: BedTypeLine) -> Self {
        Self {
            bed_type_id: l.bed_type_id,
            num_beds: l.num_beds,
        }
    }
}

impl From<BedTypeLineDto> for BedTypeLine {
    fn from(l: BedTypeLineDto) -> Self {
        Self {
            bed_type_id: l.bed_type_id,
            num_beds: l.num_beds,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomClassDto {
    pub id: String,
    pub class_name: String,
    pub slug: String,
    pub base_price: Decimal,
    pub images: Vec<String>,
    pub description: Option<String>,
    /// Feature ids, in display order
    pub features: Vec<String>,
    pub bed_types: Vec<BedTypeLineDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RoomClass> for RoomClassDto {
    fn from(c: RoomClass) -> Self {
        Self {
            id: c.id,
            class_name: c.class_name,
            slug: c.slug,
            base_price: c.base_price,
            images: c.images,
            description: c.description,
            features: c.features,
            bed_types: c.bed_types.into_iter().map(Into::into).collect(),
            created_at: c.audit.created_at,
            updated_at: c.audit.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RoomClassRequest {
    #[validate(length(min = 3, max = 100, message = "must be 3–100 characters"))]
    pub class_name: String,
    pub base_price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "You have to select at least one feature."))]
    pub features: Vec<String>,
    #[serde(default)]
    pub bed_types: Vec<BedTypeLineDto>,
}

impl From<RoomClassRequest> for RoomClassDraft {
    fn from(r: RoomClassRequest) -> Self {
        RoomClassDraft {
            class_name: r.class_name,
            base_price: r.base_price,
            images: r.images,
            description: r.description,
            features: r.features,
            bed_types: r.bed_types.into_iter().map(Into::into).collect(),
        }
    }
}
