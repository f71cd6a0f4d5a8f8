//! SeaORM repository implementations

mod addon_repository;
mod booking_repository;
mod catalog_repository;
mod floor_repository;
mod media_repository;
mod repository_provider;
mod room_class_repository;
mod room_repository;
mod user_repository;

pub use addon_repository::SeaOrmAddonRepository;
pub use booking_repository::SeaOrmBookingRepository;
pub use catalog_repository::SeaOrmCatalogRepository;
pub use floor_repository::SeaOrmFloorRepository;
pub use media_repository::SeaOrmMediaRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use room_class_repository::SeaOrmRoomClassRepository;
pub use room_repository::SeaOrmRoomRepository;
pub use user_repository::SeaOrmUserRepository;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sea_orm::{DbErr, SqlErr};

use crate::shared::{DomainError, DomainResult};

// ── Shared conversion helpers ───────────────────────────────────

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

/// Like [`db_err`], but unique-constraint violations become `Conflict`.
pub(crate) fn write_err(entity: &'static str) -> impl Fn(DbErr) -> DomainError {
    move |e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Conflict(format!("{} already exists", entity))
        }
        _ => db_err(e),
    }
}

/// Prices are stored as integer cents.
pub(crate) fn to_cents(amount: Decimal) -> DomainResult<i64> {
    (amount * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .ok_or_else(|| DomainError::Validation(format!("Amount out of range: {}", amount)))
}

pub(crate) fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// URL lists are stored as JSON text.
pub(crate) fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

pub(crate) fn decode_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn cents_conversion() {
        assert_eq!(to_cents(Decimal::from_str("120.5").unwrap()).unwrap(), 12_050);
        assert_eq!(to_cents(Decimal::ZERO).unwrap(), 0);
        assert_eq!(from_cents(999), Decimal::from_str("9.99").unwrap());
    }

    #[test]
    fn list_encoding_tolerates_garbage() {
        let urls = vec!["/uploads/a.png".to_string(), "/uploads/b.png".to_string()];
        assert_eq!(decode_list(&encode_list(&urls)), urls);
        assert!(decode_list("not json").is_empty());
    }
}
