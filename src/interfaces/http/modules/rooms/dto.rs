use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::room::{Room, RoomDraft};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoomDto {
    pub id: String,
    pub room_number: String,
    pub room_class_id: String,
    pub floor_id: String,
    pub room_status_id: String,
    pub images: Vec<String>,
    pub room_class_name: Option<String>,
    pub room_status_name: Option<String>,
    pub floor_number: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            room_number: r.room_number,
            room_class_id: r.room_class_id,
            floor_id: r.floor_id,
            room_status_id: r.room_status_id,
            images: r.images,
            room_class_name: r.related.room_class_name,
            room_status_name: r.related.room_status_name,
            floor_number: r.related.floor_number,
            created_at: r.audit.created_at,
            updated_at: r.audit.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RoomRequest {
    #[validate(length(min = 1, max = 20, message = "is required"))]
    pub room_number: String,
    #[validate(length(min = 1, message = "is required"))]
    pub room_class_id: String,
    #[validate(length(min = 1, message = "is required"))]
    pub floor_id: String,
    #[validate(length(min = 1, message = "is required"))]
    pub room_status_id: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl From<RoomRequest> for RoomDraft {
    fn from(r: RoomRequest) -> Self {
        RoomDraft {
            room_number: r.room_number,
            room_class_id: r.room_class_id,
            floor_id: r.floor_id,
            room_status_id: r.room_status_id,
            images: r.images,
        }
    }
}

/// Moves the image at `from` to position `to`.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReorderImagesRequest {
    pub from: usize,
    pub to: usize,
}
