//! Simple named lookup tables: bed types, features, payment statuses,
//! room statuses.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::audit::Audit;
use crate::domain::ports::ListedRecord;
use crate::shared::{to_slug, DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    BedType,
    Feature,
    PaymentStatus,
    RoomStatus,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 4] = [
        CatalogKind::BedType,
        CatalogKind::Feature,
        CatalogKind::PaymentStatus,
        CatalogKind::RoomStatus,
    ];

    /// Stored discriminator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BedType => "bed_type",
            Self::Feature => "feature",
            Self::PaymentStatus => "payment_status",
            Self::RoomStatus => "room_status",
        }
    }

    /// URL segment under `/api/v1`.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::BedType => "bed-types",
            Self::Feature => "features",
            Self::PaymentStatus => "payment-statuses",
            Self::RoomStatus => "room-statuses",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::BedType => "Bed type",
            Self::Feature => "Feature",
            Self::PaymentStatus => "Payment status",
            Self::RoomStatus => "Room status",
        }
    }

    pub fn min_name_len(&self) -> usize {
        match self {
            Self::Feature => 1,
            _ => 3,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == value)
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: String,
    pub kind: CatalogKind,
    pub name: String,
    pub slug: String,
    pub audit: Audit,
}

/// Create / update input.
#[derive(Debug, Clone)]
pub struct CatalogDraft {
    pub name: String,
}

impl CatalogDraft {
    pub fn validate(&self, kind: CatalogKind) -> DomainResult<()> {
        let name = self.name.trim();
        if name.chars().count() < kind.min_name_len() {
            return Err(DomainError::Validation(format!(
                "{} name must be at least {} characters",
                kind.display_name(),
                kind.min_name_len()
            )));
        }
        if to_slug(name).is_empty() {
            return Err(DomainError::Validation(format!(
                "{} name must contain letters or digits",
                kind.display_name()
            )));
        }
        Ok(())
    }
}

impl CatalogEntry {
    pub fn new(kind: CatalogKind, draft: CatalogDraft, by: &str, now: DateTime<Utc>) -> Self {
        let name = draft.name.trim().to_string();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            slug: to_slug(&name),
            name,
            audit: Audit::created(by, now),
        }
    }

    /// Renames and re-derives the slug.
    pub fn apply(&mut self, draft: CatalogDraft, by: &str, now: DateTime<Utc>) {
        self.name = draft.name.trim().to_string();
        self.slug = to_slug(&self.name);
        self.audit.touch(by, now);
    }
}

impl ListedRecord for CatalogEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.audit.created_at
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_names_may_be_short() {
        let draft = CatalogDraft { name: "TV".into() };
        assert!(draft.validate(CatalogKind::Feature).is_ok());
        assert!(draft.validate(CatalogKind::BedType).is_err());
    }

    #[test]
    fn punctuation_only_names_are_rejected() {
        let draft = CatalogDraft { name: "---".into() };
        assert!(matches!(
            draft.validate(CatalogKind::RoomStatus),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn new_entry_derives_slug() {
        let entry = CatalogEntry::new(
            CatalogKind::BedType,
            CatalogDraft { name: "  Queen Size ".into() },
            "admin@hotel.local",
            Utc::now(),
        );
        assert_eq!(entry.name, "Queen Size");
        assert_eq!(entry.slug, "queen-size");
        assert_eq!(entry.audit.created_by.as_deref(), Some("admin@hotel.local"));
    }

    #[test]
    fn kinds_round_trip_through_discriminator() {
        for kind in CatalogKind::ALL {
            assert_eq!(CatalogKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(CatalogKind::parse("nope"), None);
    }
}
