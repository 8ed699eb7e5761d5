//! Coercion
//!
//! Catalog payloads are loosely typed: prices arrive as JSON numbers, numeric
//! strings, `null`, or garbage. These helpers turn raw values into definite
//! [`Decimal`] amounts (or nothing) and are used as `deserialize_with` hooks on
//! the pricing models.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::trace;

/// Largest power of ten a [`Decimal`] can be scaled by before overflowing.
const MAX_EXPONENT: i32 = 28;

/// Coerce a raw JSON value into a price.
///
/// Numbers are taken as-is and strings are parsed leniently (the longest
/// leading numeric prefix wins, so `"12.50 USD"` is `12.50`). Anything else,
/// including `null`, booleans and non-numeric strings, is absent. Zero is a
/// present value.
///
/// Magnitudes above the [`Decimal`] range (about `7.9e28`) are absent, not
/// clamped, so `1e30` resolves like a missing price. Magnitudes below
/// `1e-28` become zero.
pub fn coerce_price(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(number) => parse_numeric_prefix(&number.to_string()),
        Value::String(raw) => {
            let parsed = parse_numeric_prefix(raw);

            if parsed.is_none() {
                trace!(raw = raw.as_str(), "discarding non-numeric price");
            }

            parsed
        }
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Cast a raw JSON value to a boolean using JavaScript truthiness.
///
/// Returns `None` for `null`, meaning "not provided".
pub fn coerce_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => Some(number.as_f64().is_some_and(|n| n.abs() > 0.0)),
        Value::String(raw) => Some(!raw.is_empty()),
        Value::Array(_) | Value::Object(_) => Some(true),
    }
}

/// Parse the longest numeric prefix of `raw`, after leading whitespace.
///
/// Accepts `[+-]digits[.digits][(e|E)[+-]digits]` with at least one mantissa
/// digit. Values that overflow a [`Decimal`] are absent.
pub fn parse_numeric_prefix(raw: &str) -> Option<Decimal> {
    let mut chars = raw.trim_start().chars().peekable();

    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut integer = String::new();
    while let Some(digit) = chars.next_if(char::is_ascii_digit) {
        integer.push(digit);
    }

    let mut fraction = String::new();
    if chars.next_if_eq(&'.').is_some() {
        while let Some(digit) = chars.next_if(char::is_ascii_digit) {
            fraction.push(digit);
        }
    }

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let exponent = if chars.next_if(|c| *c == 'e' || *c == 'E').is_some() {
        parse_exponent(chars)
    } else {
        0
    };

    let mantissa = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if integer.is_empty() { "0" } else { &integer },
        if fraction.is_empty() { "0" } else { &fraction },
    );

    let mantissa = Decimal::from_str(&mantissa).ok()?;

    scale_by_power_of_ten(mantissa, exponent)
}

/// Read an exponent's sign and digits. A malformed exponent counts as zero,
/// which leaves the mantissa as the parsed prefix.
fn parse_exponent(mut chars: impl Iterator<Item = char>) -> i32 {
    let mut exponent = String::new();

    for c in chars.by_ref() {
        match c {
            '+' | '-' if exponent.is_empty() => exponent.push(c),
            '0'..='9' => exponent.push(c),
            _ => break,
        }
    }

    // Huge exponents saturate; they are outside the representable range either way.
    exponent.parse::<i64>().map_or(0, |e| {
        i32::try_from(e.clamp(i64::from(i32::MIN), i64::from(i32::MAX))).unwrap_or(0)
    })
}

fn scale_by_power_of_ten(mantissa: Decimal, exponent: i32) -> Option<Decimal> {
    if mantissa.is_zero() || exponent == 0 {
        return Some(mantissa);
    }

    if exponent > MAX_EXPONENT {
        return None;
    }

    if exponent < -MAX_EXPONENT {
        return Some(Decimal::ZERO);
    }

    (0..exponent.unsigned_abs()).try_fold(mantissa, |acc, _| {
        if exponent > 0 {
            acc.checked_mul(Decimal::TEN)
        } else {
            acc.checked_div(Decimal::TEN)
        }
    })
}

/// `deserialize_with` hook for optional price fields.
///
/// # Errors
///
/// Only fails when the input is not valid for the underlying deserializer;
/// unusable values become `None`.
pub fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(coerce_price(&value))
}

/// `deserialize_with` hook for optional boolean overrides.
///
/// # Errors
///
/// Only fails when the input is not valid for the underlying deserializer.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(coerce_flag(&value))
}

/// `deserialize_with` hook that is `true` only for the literal boolean `true`.
///
/// # Errors
///
/// Only fails when the input is not valid for the underlying deserializer.
pub fn deserialize_strict_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;

    Ok(matches!(value, Value::Bool(true)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn numbers_and_numeric_strings_coerce_identically() {
        assert_eq!(coerce_price(&json!(199.99)), Some(Decimal::new(199_99, 2)));
        assert_eq!(coerce_price(&json!("199.99")), Some(Decimal::new(199_99, 2)));
        assert_eq!(coerce_price(&json!(1000)), Some(Decimal::from(1000)));
        assert_eq!(coerce_price(&json!("1000")), Some(Decimal::from(1000)));
    }

    #[test]
    fn zero_is_present() {
        assert_eq!(coerce_price(&json!(0)), Some(Decimal::ZERO));
        assert_eq!(coerce_price(&json!("0")), Some(Decimal::ZERO));
        assert_eq!(coerce_price(&json!(0.0)), Some(Decimal::ZERO));
    }

    #[test]
    fn non_numeric_values_are_absent() {
        assert_eq!(coerce_price(&json!(null)), None);
        assert_eq!(coerce_price(&json!("")), None);
        assert_eq!(coerce_price(&json!("   ")), None);
        assert_eq!(coerce_price(&json!("abc")), None);
        assert_eq!(coerce_price(&json!("Infinity")), None);
        assert_eq!(coerce_price(&json!(".")), None);
        assert_eq!(coerce_price(&json!(true)), None);
        assert_eq!(coerce_price(&json!([1])), None);
        assert_eq!(coerce_price(&json!({"amount": 1})), None);
    }

    #[test]
    fn strings_parse_their_leading_number() {
        assert_eq!(coerce_price(&json!("  12.5kg")), Some(Decimal::new(125, 1)));
        assert_eq!(coerce_price(&json!("49.99 USD")), Some(Decimal::new(49_99, 2)));
        assert_eq!(coerce_price(&json!("-3")), Some(Decimal::from(-3)));
        assert_eq!(coerce_price(&json!("+7")), Some(Decimal::from(7)));
        assert_eq!(coerce_price(&json!(".5")), Some(Decimal::new(5, 1)));
        assert_eq!(coerce_price(&json!("5.")), Some(Decimal::from(5)));
        assert_eq!(coerce_price(&json!("1.2.3")), Some(Decimal::new(12, 1)));
    }

    #[test]
    fn exponents_scale_the_mantissa() {
        assert_eq!(parse_numeric_prefix("1e3"), Some(Decimal::from(1000)));
        assert_eq!(parse_numeric_prefix("2.5E2"), Some(Decimal::from(250)));
        assert_eq!(parse_numeric_prefix("15e-1"), Some(Decimal::new(15, 1)));
        assert_eq!(parse_numeric_prefix("4e"), Some(Decimal::from(4)));
        assert_eq!(parse_numeric_prefix("1e40"), None);
        assert_eq!(parse_numeric_prefix("0e40"), Some(Decimal::ZERO));
        assert_eq!(parse_numeric_prefix("1e-40"), Some(Decimal::ZERO));
        assert_eq!(parse_numeric_prefix("1e99999999999"), None);
    }

    #[test]
    fn out_of_range_prices_are_absent() {
        assert_eq!(coerce_price(&json!(1e30)), None);
        assert_eq!(coerce_price(&json!("1e30")), None);
        assert_eq!(coerce_price(&json!(-1e30)), None);
        assert_eq!(coerce_price(&json!(1e-30)), Some(Decimal::ZERO));
    }

    #[test]
    fn flags_follow_truthiness() {
        assert_eq!(coerce_flag(&json!(null)), None);
        assert_eq!(coerce_flag(&json!(true)), Some(true));
        assert_eq!(coerce_flag(&json!(false)), Some(false));
        assert_eq!(coerce_flag(&json!(0)), Some(false));
        assert_eq!(coerce_flag(&json!(1)), Some(true));
        assert_eq!(coerce_flag(&json!("")), Some(false));
        assert_eq!(coerce_flag(&json!("false")), Some(true));
        assert_eq!(coerce_flag(&json!({})), Some(true));
    }
}
