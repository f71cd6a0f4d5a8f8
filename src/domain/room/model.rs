use chrono::{DateTime, Utc};

use crate::domain::audit::Audit;
use crate::shared::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: String,
    pub room_number: String,
    pub room_class_id: String,
    pub floor_id: String,
    pub room_status_id: String,
    /// Display order matters; first image is the cover.
    pub images: Vec<String>,
    pub related: RoomRelations,
    pub audit: Audit,
}

/// Names of the linked records, filled in on reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomRelations {
    pub room_class_name: Option<String>,
    pub room_status_name: Option<String>,
    pub floor_number: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct RoomDraft {
    pub room_number: String,
    pub room_class_id: String,
    pub floor_id: String,
    pub room_status_id: String,
    pub images: Vec<String>,
}

impl RoomDraft {
    pub fn validate(&self) -> DomainResult<()> {
        let required = [
            ("Room number", &self.room_number),
            ("Room class", &self.room_class_id),
            ("Floor", &self.floor_id),
            ("Room status", &self.room_status_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DomainError::Validation(format!("{} is required", field)));
            }
        }
        Ok(())
    }
}

impl Room {
    pub fn new(draft: RoomDraft, by: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            room_number: draft.room_number.trim().to_string(),
            room_class_id: draft.room_class_id,
            floor_id: draft.floor_id,
            room_status_id: draft.room_status_id,
            images: draft.images,
            related: RoomRelations::default(),
            audit: Audit::created(by, now),
        }
    }

    pub fn apply(&mut self, draft: RoomDraft, by: &str, now: DateTime<Utc>) {
        self.room_number = draft.room_number.trim().to_string();
        self.room_class_id = draft.room_class_id;
        self.floor_id = draft.floor_id;
        self.room_status_id = draft.room_status_id;
        self.images = draft.images;
        self.audit.touch(by, now);
    }

    /// Moves the image at `from` to position `to`, shifting the rest.
    pub fn reorder_images(&mut self, from: usize, to: usize) -> DomainResult<()> {
        let len = self.images.len();
        if from >= len || to >= len {
            return Err(DomainError::Validation(format!(
                "Image index out of range (room has {} images)",
                len
            )));
        }
        let image = self.images.remove(from);
        self.images.insert(to, image);
        Ok(())
    }
}
