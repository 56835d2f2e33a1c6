//! Money input validation.
//!
//! Price-like fields (product price, payment amount, order totals) accept
//! at most six integer digits and two fraction digits. The check runs on
//! the raw form input so the user sees a field-level error before any
//! decimal parsing happens.

use rust_decimal::Decimal;

/// Maximum number of integer digits in a money input.
pub const MAX_INTEGER_DIGITS: usize = 6;

/// Maximum number of fraction digits in a money input.
pub const MAX_FRACTION_DIGITS: usize = 2;

/// Errors produced by [`validate_money_input`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    /// The input string is empty.
    #[error("amount cannot be empty")]
    Empty,
    /// The input has no digits before the decimal point.
    #[error("amount must start with a digit")]
    MissingIntegerPart,
    /// The input contains something other than digits and one decimal point.
    #[error("amount may only contain digits and a decimal point")]
    InvalidCharacter,
    /// More than six digits before the decimal point.
    #[error("amount may have at most {MAX_INTEGER_DIGITS} digits before the decimal point")]
    TooManyIntegerDigits,
    /// More than two digits after the decimal point.
    #[error("amount may have at most {MAX_FRACTION_DIGITS} decimal places")]
    TooManyFractionDigits,
}

/// Validate a raw money input string and parse it into a [`Decimal`].
///
/// Accepts `\d{1,6}` optionally followed by `.` and up to two fraction
/// digits - the same shape the admin forms enforce on price, cost, and
/// payment amount fields. A trailing decimal point ("12.") is tolerated
/// and reads as a whole amount.
///
/// # Errors
///
/// Returns a [`MoneyError`] describing the first violated constraint.
pub fn validate_money_input(input: &str) -> Result<Decimal, MoneyError> {
    if input.is_empty() {
        return Err(MoneyError::Empty);
    }

    let (integer, fraction) = match input.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (input, None),
    };

    if integer.is_empty() {
        return Err(MoneyError::MissingIntegerPart);
    }

    if !integer.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MoneyError::InvalidCharacter);
    }

    if integer.len() > MAX_INTEGER_DIGITS {
        return Err(MoneyError::TooManyIntegerDigits);
    }

    if let Some(fraction) = fraction {
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MoneyError::InvalidCharacter);
        }
        if fraction.len() > MAX_FRACTION_DIGITS {
            return Err(MoneyError::TooManyFractionDigits);
        }
    }

    let normalized = match fraction {
        Some("") | None => integer.to_owned(),
        Some(f) => format!("{integer}.{f}"),
    };

    normalized
        .parse::<Decimal>()
        .map_err(|_| MoneyError::InvalidCharacter)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_whole_amounts() {
        assert_eq!(validate_money_input("0").unwrap(), Decimal::from(0));
        assert_eq!(validate_money_input("42").unwrap(), Decimal::from(42));
        assert_eq!(
            validate_money_input("999999").unwrap(),
            Decimal::from(999_999)
        );
    }

    #[test]
    fn test_accepts_fractions() {
        assert_eq!(
            validate_money_input("19.99").unwrap(),
            "19.99".parse::<Decimal>().unwrap()
        );
        assert_eq!(
            validate_money_input("19.9").unwrap(),
            "19.9".parse::<Decimal>().unwrap()
        );
    }

    #[test]
    fn test_accepts_trailing_decimal_point() {
        assert_eq!(validate_money_input("12.").unwrap(), Decimal::from(12));
    }

    #[test]
    fn test_rejects_seven_integer_digits() {
        assert_eq!(
            validate_money_input("1234567"),
            Err(MoneyError::TooManyIntegerDigits)
        );
    }

    #[test]
    fn test_rejects_three_fraction_digits() {
        assert_eq!(
            validate_money_input("12.345"),
            Err(MoneyError::TooManyFractionDigits)
        );
    }

    #[test]
    fn test_rejects_empty_and_missing_integer_part() {
        assert_eq!(validate_money_input(""), Err(MoneyError::Empty));
        assert_eq!(
            validate_money_input(".50"),
            Err(MoneyError::MissingIntegerPart)
        );
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert_eq!(
            validate_money_input("12a"),
            Err(MoneyError::InvalidCharacter)
        );
        assert_eq!(
            validate_money_input("-5"),
            Err(MoneyError::InvalidCharacter)
        );
        assert_eq!(
            validate_money_input("1.2.3"),
            Err(MoneyError::InvalidCharacter)
        );
        assert_eq!(
            validate_money_input("1,50"),
            Err(MoneyError::InvalidCharacter)
        );
    }
}
