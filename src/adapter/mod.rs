//! Implementations of ports (hexagonal adapters).

pub mod binance;
pub mod coinglass;

#[cfg(feature = "telegram")]
pub mod telegram;

use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Interpret a JSON field that may carry a decimal as a string or number.
///
/// Returns `None` for anything else (null, bool, array, object, or an
/// unparsable string), so callers can skip the record instead of failing
/// the whole payload.
pub(crate) fn decimal_field(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s.trim()).ok(),
        Value::Number(n) => n.as_f64().and_then(|f| Decimal::try_from(f).ok()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn parses_string_and_number_decimals() {
        assert_eq!(decimal_field(&json!("-0.00125")), Some(dec!(-0.00125)));
        assert_eq!(decimal_field(&json!(42)), Some(dec!(42)));
        assert_eq!(decimal_field(&json!(-0.5)), Some(dec!(-0.5)));
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert_eq!(decimal_field(&json!("not-a-rate")), None);
        assert_eq!(decimal_field(&json!(null)), None);
        assert_eq!(decimal_field(&json!(true)), None);
        assert_eq!(decimal_field(&json!(["0.1"])), None);
    }
}
