//! Quantity resolution and parsing
//!
//! Upstream product records carry their stock count under `quantity`, `q`
//! or `stock` depending on the source. Everything downstream works with the
//! single value resolved here.

use serde_json::Value;
use thiserror::Error;

use crate::models::RawProduct;

/// Stock field names in resolution order
pub const QUANTITY_KEYS: [&str; 3] = ["quantity", "q", "stock"];

/// Resolve the canonical current quantity of a raw product record.
///
/// Takes the first of `quantity`, `q`, `stock` holding a usable
/// non-negative number; anything else resolves to 0.
pub fn resolve_quantity(raw: &RawProduct) -> u64 {
    [&raw.quantity, &raw.q, &raw.stock]
        .into_iter()
        .flatten()
        .find_map(numeric_quantity)
        .unwrap_or(0)
}

/// Same as [`resolve_quantity`], straight from an untyped JSON object
pub fn resolve_quantity_value(record: &Value) -> u64 {
    QUANTITY_KEYS
        .iter()
        .filter_map(|key| record.get(*key))
        .find_map(numeric_quantity)
        .unwrap_or(0)
}

fn numeric_quantity(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(non_negative_whole)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(non_negative_whole))
        }
        _ => None,
    }
}

fn non_negative_whole(f: f64) -> Option<u64> {
    if f.is_finite() && f >= 0.0 {
        Some(f.trunc() as u64)
    } else {
        None
    }
}

/// Why a typed quantity was rejected
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityIssue {
    #[error("quantity is required")]
    Empty,
    #[error("quantity must be a whole number")]
    NotANumber,
    #[error("quantity must be greater than zero")]
    Zero,
    #[error("quantity cannot be negative")]
    Negative,
    #[error("quantity is too large")]
    TooLarge,
}

/// Parse form quantity text into a strictly positive integer
pub fn parse_quantity(input: &str) -> Result<u64, QuantityIssue> {
    let raw = input.trim();
    if raw.is_empty() {
        return Err(QuantityIssue::Empty);
    }

    if let Some(rest) = raw.strip_prefix('-') {
        if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
            if rest.bytes().all(|b| b == b'0') {
                return Err(QuantityIssue::Zero);
            }
            return Err(QuantityIssue::Negative);
        }
        return Err(QuantityIssue::NotANumber);
    }

    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(QuantityIssue::NotANumber);
    }

    match raw.parse::<u64>() {
        Ok(0) => Err(QuantityIssue::Zero),
        Ok(n) => Ok(n),
        Err(_) => Err(QuantityIssue::TooLarge),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn raw(quantity: Option<Value>, q: Option<Value>, stock: Option<Value>) -> RawProduct {
        RawProduct {
            id: "P1".to_string(),
            quantity,
            q,
            stock,
            ..Default::default()
        }
    }

    #[test]
    fn test_resolution_order() {
        assert_eq!(resolve_quantity(&raw(Some(json!(4)), Some(json!(9)), Some(json!(7)))), 4);
        assert_eq!(resolve_quantity(&raw(None, Some(json!(9)), Some(json!(7)))), 9);
        assert_eq!(resolve_quantity(&raw(None, None, Some(json!(7)))), 7);
        assert_eq!(resolve_quantity(&raw(None, None, None)), 0);
    }

    #[test]
    fn test_non_numeric_falls_through() {
        assert_eq!(resolve_quantity(&raw(Some(json!("n/a")), Some(json!(9)), None)), 9);
        assert_eq!(resolve_quantity(&raw(Some(json!(-3)), None, Some(json!(2)))), 2);
        assert_eq!(resolve_quantity(&raw(Some(json!(true)), None, None)), 0);
        assert_eq!(resolve_quantity(&raw(Some(json!([1])), Some(json!({})), None)), 0);
    }

    #[test]
    fn test_numeric_strings_and_floats() {
        assert_eq!(resolve_quantity(&raw(Some(json!(" 15 ")), None, None)), 15);
        assert_eq!(resolve_quantity(&raw(Some(json!(12.9)), None, None)), 12);
        assert_eq!(resolve_quantity(&raw(Some(json!("3.5")), None, None)), 3);
        assert_eq!(resolve_quantity(&raw(Some(json!("NaN")), Some(json!(1)), None)), 1);
    }

    #[test]
    fn test_resolve_from_untyped_value() {
        assert_eq!(resolve_quantity_value(&json!({"id": "A", "stock": 5})), 5);
        assert_eq!(resolve_quantity_value(&json!({"id": "A", "q": "8", "stock": 5})), 8);
        assert_eq!(resolve_quantity_value(&json!({"id": "A"})), 0);
        assert_eq!(resolve_quantity_value(&json!("not an object")), 0);
    }

    #[test]
    fn test_parse_quantity_rejections() {
        assert_eq!(parse_quantity(""), Err(QuantityIssue::Empty));
        assert_eq!(parse_quantity("   "), Err(QuantityIssue::Empty));
        assert_eq!(parse_quantity("0"), Err(QuantityIssue::Zero));
        assert_eq!(parse_quantity("000"), Err(QuantityIssue::Zero));
        assert_eq!(parse_quantity("-5"), Err(QuantityIssue::Negative));
        assert_eq!(parse_quantity("-0"), Err(QuantityIssue::Zero));
        assert_eq!(parse_quantity("abc"), Err(QuantityIssue::NotANumber));
        assert_eq!(parse_quantity("+3"), Err(QuantityIssue::NotANumber));
        assert_eq!(parse_quantity("1.5"), Err(QuantityIssue::NotANumber));
        assert_eq!(parse_quantity("-"), Err(QuantityIssue::NotANumber));
        assert_eq!(
            parse_quantity("99999999999999999999999"),
            Err(QuantityIssue::TooLarge)
        );
    }

    #[test]
    fn test_parse_quantity_accepts_digits() {
        assert_eq!(parse_quantity("1"), Ok(1));
        assert_eq!(parse_quantity("042"), Ok(42));
        assert_eq!(parse_quantity(" 7 "), Ok(7));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_positive_digits_always_parse(n in 1u64..=1_000_000u64) {
            prop_assert_eq!(parse_quantity(&n.to_string()), Ok(n));
        }

        #[test]
        fn prop_negative_never_parses(n in 1u64..=1_000_000u64) {
            let input = format!("-{}", n);
            prop_assert!(parse_quantity(&input).is_err());
        }

        #[test]
        fn prop_quantity_key_wins(a in 0u64..10_000, b in 0u64..10_000, c in 0u64..10_000) {
            let record = raw(Some(json!(a)), Some(json!(b)), Some(json!(c)));
            prop_assert_eq!(resolve_quantity(&record), a);
        }
    }
}
