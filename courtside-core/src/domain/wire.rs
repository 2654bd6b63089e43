//! Lenient field decoders for backend JSON.
//!
//! The backend is loosely typed: ids arrive as numbers or strings, numeric
//! stats may be `null`, and descriptive fields (height, salary, experience)
//! mix strings and numbers. These helpers default or coerce at the boundary
//! so the rest of the crate only sees well-typed values.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `null`, missing, or non-numeric → `0.0`. Numeric strings are parsed.
pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64).unwrap_or(0.0))
}

/// `null`, missing, or non-numeric → `None`.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_f64))
}

/// Any scalar rendered as a display string; `null` → `None`.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| match v {
        Value::Null => None,
        other => Some(display_value(other)),
    }))
}

/// Numeric id given as a number or a numeric string.
pub fn id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_as_id(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected numeric id, got {value}")))
}

/// Optional id; anything unparseable → `None`.
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_id))
}

/// Array of numbers where `null` entries become `0.0`; `null` array → empty.
pub fn f64_vec<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(value
        .unwrap_or_default()
        .iter()
        .map(|v| value_as_f64(v).unwrap_or(0.0))
        .collect())
}

/// Finite numbers only; `"NaN"` and `"inf"` strings count as missing.
fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
}

fn value_as_id(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Render a JSON value for a table cell.
///
/// Strings are shown without quotes, floats are trimmed to two decimals
/// when they carry a fractional part, and `null` becomes `N/A`.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "N/A".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 => format!("{f:.0}"),
            (None, Some(f)) => format!("{f:.2}"),
            _ => n.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "f64_or_zero")]
        n: f64,
        #[serde(default, deserialize_with = "opt_string")]
        s: Option<String>,
        #[serde(deserialize_with = "id")]
        id: u64,
        #[serde(default, deserialize_with = "f64_vec")]
        xs: Vec<f64>,
    }

    #[test]
    fn null_and_missing_numbers_default_to_zero() {
        let p: Probe = serde_json::from_value(json!({"n": null, "id": 1})).unwrap();
        assert_eq!(p.n, 0.0);
        let p: Probe = serde_json::from_value(json!({"id": 1})).unwrap();
        assert_eq!(p.n, 0.0);
        let p: Probe = serde_json::from_value(json!({"n": "12.5", "id": 1})).unwrap();
        assert_eq!(p.n, 12.5);
    }

    #[test]
    fn ids_accept_numbers_and_strings() {
        let p: Probe = serde_json::from_value(json!({"id": "1610612752"})).unwrap();
        assert_eq!(p.id, 1_610_612_752);
        let p: Probe = serde_json::from_value(json!({"id": 203999})).unwrap();
        assert_eq!(p.id, 203_999);
        assert!(serde_json::from_value::<Probe>(json!({"id": "abc"})).is_err());
    }

    #[test]
    fn scalars_become_display_strings() {
        let p: Probe = serde_json::from_value(json!({"s": 7, "id": 1})).unwrap();
        assert_eq!(p.s.as_deref(), Some("7"));
        let p: Probe = serde_json::from_value(json!({"s": null, "id": 1})).unwrap();
        assert!(p.s.is_none());
    }

    #[test]
    fn non_finite_strings_default_to_zero() {
        for text in ["NaN", "inf", "-infinity"] {
            let p: Probe = serde_json::from_value(json!({"n": text, "id": 1})).unwrap();
            assert_eq!(p.n, 0.0, "{text}");
        }
        let p: Probe = serde_json::from_value(json!({"xs": [1, "NaN", 2], "id": 1})).unwrap();
        assert_eq!(p.xs, vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn vec_nulls_become_zero() {
        let p: Probe = serde_json::from_value(json!({"xs": [1, null, 2.5], "id": 1})).unwrap();
        assert_eq!(p.xs, vec![1.0, 0.0, 2.5]);
    }

    #[test]
    fn display_formats() {
        assert_eq!(display_value(&json!(null)), "N/A");
        assert_eq!(display_value(&json!(3)), "3");
        assert_eq!(display_value(&json!(3.14159)), "3.14");
        assert_eq!(display_value(&json!("W")), "W");
    }
}
