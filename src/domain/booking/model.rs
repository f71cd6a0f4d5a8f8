//! Booking with its add-on line items.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::audit::Audit;
use crate::shared::{validate_booking_amount, validate_line_price, DomainError, DomainResult};

pub const MAX_ADULTS: i32 = 10;
pub const MAX_CHILDREN: i32 = 10;

/// Free-form add-on line priced at booking time.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingAddon {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub id: String,
    pub guest_id: String,
    pub room_id: String,
    pub payment_status_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub num_adults: i32,
    pub num_children: i32,
    pub booking_amount: Decimal,
    pub add_ons: Vec<BookingAddon>,
    pub related: BookingRelations,
    pub audit: Audit,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingRelations {
    pub room_number: Option<String>,
    pub guest_name: Option<String>,
    pub payment_status_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub guest_id: String,
    pub room_id: String,
    pub payment_status_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub num_adults: i32,
    pub num_children: i32,
    pub booking_amount: Decimal,
    pub add_ons: Vec<BookingAddon>,
}

impl BookingDraft {
    /// `today` is the current UTC date; neither date may precede it.
    pub fn validate(&self, today: NaiveDate) -> DomainResult<()> {
        for (field, value) in [
            ("Guest", &self.guest_id),
            ("Room", &self.room_id),
            ("Payment status", &self.payment_status_id),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::Validation(format!("{} is required", field)));
            }
        }

        if self.check_in < today || self.check_out < today {
            return Err(DomainError::Validation("Past date not allowed".into()));
        }
        if self.check_out < self.check_in {
            return Err(DomainError::Validation(
                "Checkout date cannot be before checkin date".into(),
            ));
        }

        if !(1..=MAX_ADULTS).contains(&self.num_adults) {
            return Err(DomainError::Validation(format!(
                "Number of adults must be between 1 and {}",
                MAX_ADULTS
            )));
        }
        if !(0..=MAX_CHILDREN).contains(&self.num_children) {
            return Err(DomainError::Validation(format!(
                "Number of children must be between 0 and {}",
                MAX_CHILDREN
            )));
        }

        validate_booking_amount(&self.booking_amount)?;

        for line in &self.add_ons {
            if line.name.trim().is_empty() {
                return Err(DomainError::Validation("Add-on name is required".into()));
            }
            validate_line_price(&line.price)?;
        }
        Ok(())
    }
}

impl Booking {
    pub fn new(draft: BookingDraft, by: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            guest_id: draft.guest_id,
            room_id: draft.room_id,
            payment_status_id: draft.payment_status_id,
            check_in: draft.check_in,
            check_out: draft.check_out,
            num_adults: draft.num_adults,
            num_children: draft.num_children,
            booking_amount: draft.booking_amount,
            add_ons: draft.add_ons,
            related: BookingRelations::default(),
            audit: Audit::created(by, now),
        }
    }

    /// Add-on lines are replaced wholesale.
    pub fn apply(&mut self, draft: BookingDraft, by: &str, now: DateTime<Utc>) {
        self.guest_id = draft.guest_id;
        self.room_id = draft.room_id;
        self.payment_status_id = draft.payment_status_id;
        self.check_in = draft.check_in;
        self.check_out = draft.check_out;
        self.num_adults = draft.num_adults;
        self.num_children = draft.num_children;
        self.booking_amount = draft.booking_amount;
        self.add_ons = draft.add_ons;
        self.audit.touch(by, now);
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    fn draft() -> BookingDraft {
        BookingDraft {
            guest_id: "g".into(),
            room_id: "r".into(),
            payment_status_id: "p".into(),
            check_in: today(),
            check_out: today() + chrono::Duration::days(2),
            num_adults: 2,
            num_children: 0,
            booking_amount: Decimal::new(25_000, 2),
            add_ons: vec![BookingAddon {
                name: "Breakfast".into(),
                price: Decimal::new(1_250, 2),
            }],
        }
    }

    #[test]
    fn valid_booking() {
        assert!(draft().validate(today()).is_ok());
    }

    #[test]
    fn same_day_checkout_is_allowed() {
        let mut d = draft();
        d.check_out = d.check_in;
        assert!(d.validate(today()).is_ok());
    }

    #[test]
    fn past_dates_rejected() {
        let mut d = draft();
        d.check_in = today().pred_opt().unwrap();
        let err = d.validate(today()).unwrap_err();
        assert_eq!(err.to_string(), "Validation: Past date not allowed");
    }

    #[test]
    fn checkout_before_checkin_rejected() {
        let mut d = draft();
        d.check_in = today() + chrono::Duration::days(3);
        d.check_out = today() + chrono::Duration::days(1);
        let err = d.validate(today()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation: Checkout date cannot be before checkin date"
        );
    }

    #[test]
    fn guest_counts() {
        let mut d = draft();
        d.num_adults = 0;
        assert!(d.validate(today()).is_err());
        d.num_adults = 10;
        d.num_children = 11;
        assert!(d.validate(today()).is_err());
        d.num_children = 10;
        assert!(d.validate(today()).is_ok());
    }

    #[test]
    fn amount_and_line_prices() {
        let mut d = draft();
        d.booking_amount = Decimal::new(100_001, 2);
        assert!(d.validate(today()).is_err());

        let mut d = draft();
        d.add_ons[0].price = Decimal::ZERO;
        assert!(d.validate(today()).is_err());

        let mut d = draft();
        d.add_ons[0].name = " ".into();
        assert!(d.validate(today()).is_err());
    }

    #[test]
    fn nights_between_dates() {
        let b = Booking::new(draft(), "a@b.c", Utc::now());
        assert_eq!(b.nights(), 2);
    }
}
