use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::floor::{Floor, FloorDraft};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FloorDto {
    pub id: String,
    pub floor_number: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Floor> for FloorDto {
    fn from(f: Floor) -> Self {
        Self {
            id: f.id,
            floor_number: f.floor_number,
            created_at: f.audit.created_at,
            updated_at: f.audit.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct FloorRequest {
    /// Negative for basements
    pub floor_number: i32,
}

impl From<FloorRequest> for FloorDraft {
    fn from(r: FloorRequest) -> Self {
        FloorDraft {
            floor_number: r.floor_number,
        }
    }
}
