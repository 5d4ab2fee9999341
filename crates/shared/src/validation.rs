//! Common validation utilities.

use rust_decimal::Decimal;
use validator::ValidationError;

/// Validates an ISO-4217-style currency code: 3 to 10 uppercase ASCII
/// letters. Crypto tickers longer than three letters are accepted.
pub fn validate_currency_code(code: &str) -> Result<(), ValidationError> {
    let len_ok = (3..=10).contains(&code.len());
    let chars_ok = code.chars().all(|c| c.is_ascii_uppercase());
    if len_ok && chars_ok {
        Ok(())
    } else {
        let mut err = ValidationError::new("currency_code");
        err.message = Some("Currency must be 3-10 uppercase letters".into());
        Err(err)
    }
}

/// Validates that a monetary amount is strictly positive.
pub fn validate_positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_positive() && !amount.is_zero() {
        Ok(())
    } else {
        let mut err = ValidationError::new("amount_positive");
        err.message = Some("Amount must be greater than zero".into());
        Err(err)
    }
}

/// Validates a percentage value in the inclusive 0..=100 range.
pub fn validate_percentage(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO && *value <= Decimal::from(100) {
        Ok(())
    } else {
        let mut err = ValidationError::new("percentage_range");
        err.message = Some("Percentage must be between 0 and 100".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("EUR").is_ok());
        assert!(validate_currency_code("USDT").is_ok());
        assert!(validate_currency_code("us").is_err());
        assert!(validate_currency_code("usd").is_err());
        assert!(validate_currency_code("US1").is_err());
        assert!(validate_currency_code("").is_err());
        assert!(validate_currency_code("TOOLONGCODEX").is_err());
    }

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount(&dec!(0.01)).is_ok());
        assert!(validate_positive_amount(&dec!(1000)).is_ok());
        assert!(validate_positive_amount(&dec!(0)).is_err());
        assert!(validate_positive_amount(&dec!(-5)).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage(&dec!(0)).is_ok());
        assert!(validate_percentage(&dec!(12.5)).is_ok());
        assert!(validate_percentage(&dec!(100)).is_ok());
        assert!(validate_percentage(&dec!(100.1)).is_err());
        assert!(validate_percentage(&dec!(-0.1)).is_err());
    }
}
