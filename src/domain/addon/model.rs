use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::audit::Audit;
use crate::shared::{to_slug, validate_catalog_price, DomainError, DomainResult};

/// Purchasable extra (breakfast, airport pickup, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct Addon {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub audit: Audit,
}

#[derive(Debug, Clone)]
pub struct AddonDraft {
    pub name: String,
    pub price: Decimal,
}

impl AddonDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().chars().count() < 3 {
            return Err(DomainError::Validation(
                "Add-on name must be at least 3 characters".into(),
            ));
        }
        validate_catalog_price(&self.price)?;
        Ok(())
    }
}

impl Addon {
    pub fn new(draft: AddonDraft, by: &str, now: DateTime<Utc>) -> Self {
        let name = draft.name.trim().to_string();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            slug: to_slug(&name),
            name,
            price: draft.price,
            audit: Audit::created(by, now),
        }
    }

    pub fn apply(&mut self, draft: AddonDraft, by: &str, now: DateTime<Utc>) {
        self.name = draft.name.trim().to_string();
        self.slug = to_slug(&self.name);
        self.price = draft.price;
        self.audit.touch(by, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn draft(name: &str, price: &str) -> AddonDraft {
        AddonDraft {
            name: name.into(),
            price: Decimal::from_str(price).unwrap(),
        }
    }

    #[test]
    fn accepts_free_addon() {
        assert!(draft("Breakfast", "0").validate().is_ok());
    }

    #[test]
    fn rejects_short_name_and_bad_price() {
        assert!(draft("Tv", "5").validate().is_err());
        assert!(draft("Spa access", "10000.50").validate().is_err());
        assert!(draft("Spa access", "9.999").validate().is_err());
    }

    #[test]
    fn apply_rederives_slug() {
        let mut addon = Addon::new(draft("Late checkout", "15"), "a@b.c", Utc::now());
        assert_eq!(addon.slug, "late-checkout");
        addon.apply(draft("Early Check-in", "20"), "x@y.z", Utc::now());
        assert_eq!(addon.slug, "early-check-in");
        assert_eq!(addon.audit.updated_by.as_deref(), Some("x@y.z"));
    }
}
