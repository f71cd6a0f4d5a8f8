//! Room class: the sellable category a room belongs to.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::audit::Audit;
use crate::shared::{to_slug, validate_catalog_price, DomainError, DomainResult};

pub const MAX_BEDS_PER_TYPE: i32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedTypeLine {
    pub bed_type_id: String,
    pub num_beds: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoomClass {
    pub id: String,
    pub class_name: String,
    pub slug: String,
    pub base_price: Decimal,
    pub images: Vec<String>,
    pub description: Option<String>,
    /// Feature catalog ids.
    pub features: Vec<String>,
    pub bed_types: Vec<BedTypeLine>,
    pub audit: Audit,
}

#[derive(Debug, Clone)]
pub struct RoomClassDraft {
    pub class_name: String,
    pub base_price: Decimal,
    pub images: Vec<String>,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub bed_types: Vec<BedTypeLine>,
}

impl RoomClassDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.class_name.trim().chars().count() < 3 {
            return Err(DomainError::Validation(
                "Class name must be at least 3 characters".into(),
            ));
        }
        validate_catalog_price(&self.base_price)?;

        if !self.features.iter().any(|f| !f.trim().is_empty()) {
            return Err(DomainError::Validation(
                "You have to select at least one feature.".into(),
            ));
        }

        let mut seen = HashSet::new();
        for line in &self.bed_types {
            if line.bed_type_id.trim().is_empty() {
                return Err(DomainError::Validation("Bed type is required".into()));
            }
            if !(1..=MAX_BEDS_PER_TYPE).contains(&line.num_beds) {
                return Err(DomainError::Validation(format!(
                    "Number of beds must be between 1 and {}",
                    MAX_BEDS_PER_TYPE
                )));
            }
            if !seen.insert(line.bed_type_id.as_str()) {
                return Err(DomainError::Validation("Duplicate bed type".into()));
            }
        }
        Ok(())
    }

    fn clean_features(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.features
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty() && seen.insert(*f))
            .map(str::to_string)
            .collect()
    }
}

impl RoomClass {
    pub fn new(draft: RoomClassDraft, by: &str, now: DateTime<Utc>) -> Self {
        let class_name = draft.class_name.trim().to_string();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            slug: to_slug(&class_name),
            features: draft.clean_features(),
            class_name,
            base_price: draft.base_price,
            images: draft.images,
            description: draft.description,
            bed_types: draft.bed_types,
            audit: Audit::created(by, now),
        }
    }

    /// Features and bed-type lines are replaced wholesale.
    pub fn apply(&mut self, draft: RoomClassDraft, by: &str, now: DateTime<Utc>) {
        self.features = draft.clean_features();
        self.class_name = draft.class_name.trim().to_string();
        self.slug = to_slug(&self.class_name);
        self.base_price = draft.base_price;
        self.images = draft.images;
        self.description = draft.description;
        self.bed_types = draft.bed_types;
        self.audit.touch(by, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RoomClassDraft {
        RoomClassDraft {
            class_name: "Deluxe".into(),
            base_price: Decimal::new(12_050, 2),
            images: vec![],
            description: None,
            features: vec!["f-1".into()],
            bed_types: vec![BedTypeLine {
                bed_type_id: "b-1".into(),
                num_beds: 2,
            }],
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn requires_a_feature() {
        let mut d = draft();
        d.features = vec!["".into(), "  ".into()];
        assert!(d.validate().is_err());
    }

    #[test]
    fn bed_count_bounds() {
        let mut d = draft();
        d.bed_types[0].num_beds = 0;
        assert!(d.validate().is_err());
        d.bed_types[0].num_beds = 4;
        assert!(d.validate().is_err());
        d.bed_types[0].num_beds = 3;
        assert!(d.validate().is_ok());
    }

    #[test]
    fn duplicate_bed_types_rejected() {
        let mut d = draft();
        d.bed_types.push(BedTypeLine {
            bed_type_id: "b-1".into(),
            num_beds: 1,
        });
        let err = d.validate().unwrap_err();
        assert_eq!(err.to_string(), "Validation: Duplicate bed type");
    }

    #[test]
    fn features_are_deduplicated() {
        let mut d = draft();
        d.features = vec!["f-1".into(), "f-1".into(), " f-2 ".into(), "".into()];
        let rc = RoomClass::new(d, "a@b.c", Utc::now());
        assert_eq!(rc.features, vec!["f-1".to_string(), "f-2".to_string()]);
        assert_eq!(rc.slug, "deluxe");
    }
}
