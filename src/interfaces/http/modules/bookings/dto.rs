use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::booking::{Booking, BookingAddon, BookingDraft};

/// Add-on line priced at booking time
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingAddonDto {
    pub name: String,
    pub price: Decimal,
}

impl From<BookingAddon> for BookingAddonDto {
    fn from(a: BookingAddon) -> Self {
        Self {
            name: a.name,
            price: a.price,
        }
    }
}

impl From<BookingAddonDto> for BookingAddon {
    fn from(a: BookingAddonDto) -> Self {
        Self {
            name: a.name,
            price: a.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingDto {
    pub id: String,
    pub guest_id: String,
    pub room_id: String,
    pub payment_status_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub num_adults: i32,
    pub num_children: i32,
    pub booking_amount: Decimal,
    pub add_ons: Vec<BookingAddonDto>,
    pub room_number: Option<String>,
    pub guest_name: Option<String>,
    pub payment_status_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingDto {
    fn from(b: Booking) -> Self {
        Self {
            nights: b.nights(),
            id: b.id,
            guest_id: b.guest_id,
            room_id: b.room_id,
            payment_status_id: b.payment_status_id,
            check_in: b.check_in,
            check_out: b.check_out,
            num_adults: b.num_adults,
            num_children: b.num_children,
            booking_amount: b.booking_amount,
            add_ons: b.add_ons.into_iter().map(Into::into).collect(),
            room_number: b.related.room_number,
            guest_name: b.related.guest_name,
            payment_status_name: b.related.payment_status_name,
            created_at: b.audit.created_at,
            updated_at: b.audit.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookingRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub guest_id: String,
    #[validate(length(min = 1, message = "is required"))]
    pub room_id: String,
    #[validate(length(min = 1, message = "is required"))]
    pub payment_status_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[validate(range(min = 1, max = 10, message = "must be between 1 and 10"))]
    pub num_adults: i32,
    #[serde(default)]
    #[validate(range(min = 0, max = 10, message = "must be between 0 and 10"))]
    pub num_children: i32,
    pub booking_amount: Decimal,
    #[serde(default)]
    pub add_ons: Vec<BookingAddonDto>,
}

impl From<BookingRequest> for BookingDraft {
    fn from(r: BookingRequest) -> Self {
        BookingDraft {
            guest_id: r.guest_id,
            room_id: r.room_id,
            payment_status_id: r.payment_status_id,
            check_in: r.check_in,
            check_out: r.check_out,
            num_adults: r.num_adults,
            num_children: r.num_children,
            booking_amount: r.booking_amount,
            add_ons: r.add_ons.into_iter().map(Into::into).collect(),
        }
    }
}
