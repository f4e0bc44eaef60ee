//! Field decoders that never fail.
//!
//! Browser collectors and geolocation APIs send whatever they have: numbers as
//! strings, `null`, empty strings, the occasional object where a flag belongs.
//! Each decoder maps anything it cannot interpret to `None` so the field is
//! scored as absent instead of rejecting the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::types::DeviceClass;

pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_number(&value))
}

pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_flag(&value))
}

pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_text(&value))
}

pub fn device<'de, D>(deserializer: D) -> Result<Option<DeviceClass>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_text(&value).and_then(|s| DeviceClass::parse(&s)))
}

fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn as_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        // Postal codes and versions sometimes arrive as bare numbers
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_accepts_numeric_strings() {
        assert_eq!(as_number(&json!("8")), Some(8.0));
        assert_eq!(as_number(&json!(" 6.5 ")), Some(6.5));
        assert_eq!(as_number(&json!(4)), Some(4.0));
    }

    #[test]
    fn test_number_rejects_garbage() {
        assert_eq!(as_number(&json!("fast")), None);
        assert_eq!(as_number(&json!(null)), None);
        assert_eq!(as_number(&json!({"value": 3})), None);
        assert_eq!(as_number(&json!("NaN")), None);
    }

    #[test]
    fn test_flag_variants() {
        assert_eq!(as_flag(&json!(true)), Some(true));
        assert_eq!(as_flag(&json!("false")), Some(false));
        assert_eq!(as_flag(&json!(0)), Some(false));
        assert_eq!(as_flag(&json!("maybe")), None);
    }

    #[test]
    fn test_text_drops_empty_and_stringifies_numbers() {
        assert_eq!(as_text(&json!("")), None);
        assert_eq!(as_text(&json!(110001)), Some("110001".to_string()));
        assert_eq!(as_text(&json!(["Delhi"])), None);
    }
}
