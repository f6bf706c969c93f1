use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::{error::TrackingError, models::QuoteRecord};

pub const GLOBAL_QUOTE_KEY: &str = "Global Quote";
pub const PRICE_KEY: &str = "price";
pub const LOW_KEY: &str = "low";
pub const HIGH_KEY: &str = "high";

/// First entry, in document order, whose key contains `needle`.
///
/// Matching is a case-sensitive substring test so that both `"05. price"` and
/// `"price"` are found. If several keys match, the earliest one wins.
pub fn find_key_by_partial_match<'a>(
    object: &'a Map<String, Value>,
    needle: &str,
) -> Option<(&'a str, &'a Value)> {
    object
        .iter()
        .find(|(key, _)| key.contains(needle))
        .map(|(key, value)| (key.as_str(), value))
}

fn decimal_field(object: &Map<String, Value>, needle: &str) -> Result<String, TrackingError> {
    let (key, value) = find_key_by_partial_match(object, needle).ok_or_else(|| {
        TrackingError::SchemaValidation(format!("No field matching '{}' in quote", needle))
    })?;

    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => {
            return Err(TrackingError::SchemaValidation(format!(
                "Field '{}' is not a string or number",
                key
            )));
        }
    };

    text.parse::<Decimal>().map_err(|e| {
        TrackingError::SchemaValidation(format!("Failed to parse '{}' as decimal: {}", key, e))
    })?;

    Ok(text)
}

/// Builds a quote for `symbol` from a GLOBAL_QUOTE body.
pub fn extract_quote(symbol: &str, body: &Value) -> Result<QuoteRecord, TrackingError> {
    let quote = body
        .get(GLOBAL_QUOTE_KEY)
        .and_then(Value::as_object)
        .ok_or_else(|| {
            TrackingError::SchemaValidation(format!(
                "Failed to find '{}' in the response",
                GLOBAL_QUOTE_KEY
            ))
        })?;

    Ok(QuoteRecord::new(
        symbol.to_string(),
        decimal_field(quote, PRICE_KEY)?,
        decimal_field(quote, LOW_KEY)?,
        decimal_field(quote, HIGH_KEY)?,
    ))
}
