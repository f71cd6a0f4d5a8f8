use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::ValidationError;

/// Lenient page coercion for query strings: anything missing,
/// non-numeric or below 1 becomes page 1.
pub fn coerce_page(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|p| *p >= 1)
        .map(|p| p.min(u32::MAX as i64) as u32)
        .unwrap_or(1)
}

/// URL-safe slug: lowercase alphanumerics, other runs collapsed into `-`.
pub fn to_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn money_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// At most two decimal places.
pub fn has_cents_precision(value: &Decimal) -> bool {
    value.normalize().scale() <= 2
}

/// Catalog prices: zero or positive, at most 10000, two decimals.
pub fn validate_catalog_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(money_error(
            "price_negative",
            "Price must be a positive number or zero.",
        ));
    }
    if *value > Decimal::from(10_000) {
        return Err(money_error("price_max", "Price must not exceed 10000"));
    }
    if !has_cents_precision(value) {
        return Err(money_error(
            "price_precision",
            "Price can have at most two decimal places.",
        ));
    }
    Ok(())
}

/// Booking amounts: 1..=1000, two decimals.
pub fn validate_booking_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ONE {
        return Err(money_error("amount_min", "Required"));
    }
    if *value > Decimal::from(1_000) {
        return Err(money_error("amount_max", "Amount must not exceed 1000"));
    }
    if !has_cents_precision(value) {
        return Err(money_error("amount_precision", "Two decimal places only."));
    }
    Ok(())
}

/// Booking add-on line prices: strictly positive, at most 1000, two decimals.
pub fn validate_line_price(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(money_error("price_positive", "Must be positive."));
    }
    if *value > Decimal::from(1_000) {
        return Err(money_error("price_max", "Price must not exceed 1000"));
    }
    if !has_cents_precision(value) {
        return Err(money_error("price_precision", "Two decimal places only."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn page_coercion() {
        assert_eq!(coerce_page(None), 1);
        assert_eq!(coerce_page(Some("")), 1);
        assert_eq!(coerce_page(Some("abc")), 1);
        assert_eq!(coerce_page(Some("0")), 1);
        assert_eq!(coerce_page(Some("-4")), 1);
        assert_eq!(coerce_page(Some(" 3 ")), 3);
    }

    #[test]
    fn slugs() {
        assert_eq!(to_slug("King Size"), "king-size");
        assert_eq!(to_slug("  Deluxe -- Suite!! "), "deluxe-suite");
        assert_eq!(to_slug("Wi-Fi"), "wi-fi");
        assert_eq!(to_slug("***"), "");
    }

    #[test]
    fn catalog_price_rules() {
        assert!(validate_catalog_price(&dec("0")).is_ok());
        assert!(validate_catalog_price(&dec("99.99")).is_ok());
        assert!(validate_catalog_price(&dec("10.500")).is_ok());
        assert!(validate_catalog_price(&dec("-1")).is_err());
        assert!(validate_catalog_price(&dec("10000.01")).is_err());
        assert!(validate_catalog_price(&dec("1.001")).is_err());
    }

    #[test]
    fn booking_amount_rules() {
        assert!(validate_booking_amount(&dec("1")).is_ok());
        assert!(validate_booking_amount(&dec("1000")).is_ok());
        assert!(validate_booking_amount(&dec("0.99")).is_err());
        assert!(validate_booking_amount(&dec("1000.01")).is_err());
    }

    #[test]
    fn line_price_rules() {
        assert!(validate_line_price(&dec("0.01")).is_ok());
        assert!(validate_line_price(&dec("0")).is_err());
        assert!(validate_line_price(&dec("12.345")).is_err());
    }
}
