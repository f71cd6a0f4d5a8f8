use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::domain::audit::Audit;
use crate::domain::ports::ListedRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct Floor {
    pub id: String,
    pub floor_number: i32,
    pub audit: Audit,
}

#[derive(Debug, Clone, Copy)]
pub struct FloorDraft {
    pub floor_number: i32,
}

impl Floor {
    pub fn new(draft: FloorDraft, by: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            floor_number: draft.floor_number,
            audit: Audit::created(by, now),
        }
    }

    pub fn apply(&mut self, draft: FloorDraft, by: &str, now: DateTime<Utc>) {
        self.floor_number = draft.floor_number;
        self.audit.touch(by, now);
    }
}

impl ListedRecord for Floor {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.audit.created_at
    }

    fn label(&self) -> String {
        self.floor_number.to_string()
    }

    // numeric, so floor 10 sorts after floor 9
    fn cmp_label(&self, other: &Self) -> Ordering {
        self.floor_number.cmp(&other.floor_number)
    }
}
