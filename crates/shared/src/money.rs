//! Conversion between ledger minor units and decimal major units.
//!
//! The withdrawal ledger stores amounts as integer minor units (cents).
//! Threshold limits and volume aggregates are configured and compared in
//! decimal major units. Every conversion between the two representations
//! goes through this module so the scale factor lives in exactly one place.

use rust_decimal::Decimal;

/// Minor units per major unit (cents per whole currency unit).
const MINOR_UNITS_SCALE: u32 = 2;

/// Converts an amount in minor units (cents) to a decimal major-unit amount.
///
/// The result is exact: `12345` cents becomes `123.45`, never a float
/// approximation.
pub fn minor_units_to_decimal(amount_minor_units: i64) -> Decimal {
    Decimal::new(amount_minor_units, MINOR_UNITS_SCALE)
}

/// Converts a decimal major-unit amount back to minor units, truncating any
/// sub-cent fraction toward zero.
///
/// Returns `None` if the amount does not fit in an `i64` of minor units.
pub fn decimal_to_minor_units(amount: Decimal) -> Option<i64> {
    let scaled = amount.checked_mul(Decimal::from(10_i64.pow(MINOR_UNITS_SCALE)))?;
    scaled.trunc().try_into().ok()
}

/// Formats a decimal amount with two fractional digits for reason strings.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_minor_units_to_decimal() {
        assert_eq!(minor_units_to_decimal(0), dec!(0.00));
        assert_eq!(minor_units_to_decimal(1), dec!(0.01));
        assert_eq!(minor_units_to_decimal(12345), dec!(123.45));
        assert_eq!(minor_units_to_decimal(500_00), dec!(500.00));
    }

    #[test]
    fn test_minor_units_to_decimal_is_exact_for_float_hostile_values() {
        // 0.1 + 0.2 style values that drift under f64 stay exact here.
        let sum = minor_units_to_decimal(10) + minor_units_to_decimal(20);
        assert_eq!(sum, dec!(0.30));
    }

    #[test]
    fn test_decimal_to_minor_units_roundtrip() {
        for cents in [0_i64, 1, 99, 100, 12345, 1_000_000_00] {
            let major = minor_units_to_decimal(cents);
            assert_eq!(decimal_to_minor_units(major), Some(cents));
        }
    }

    #[test]
    fn test_decimal_to_minor_units_truncates_sub_cent() {
        assert_eq!(decimal_to_minor_units(dec!(1.239)), Some(123));
        assert_eq!(decimal_to_minor_units(dec!(-1.239)), Some(-123));
    }

    #[test]
    fn test_decimal_to_minor_units_overflow() {
        let huge = Decimal::MAX;
        assert_eq!(decimal_to_minor_units(huge), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec!(1500)), "1500.00");
        assert_eq!(format_amount(dec!(0.5)), "0.50");
        assert_eq!(format_amount(dec!(123.456)), "123.46");
    }
}
