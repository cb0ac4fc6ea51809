//! Conversion between Firestore typed values and plain JSON
//!
//! Firestore wraps every value in a single-key object naming its type
//! (`{"stringValue": "x"}`, `{"mapValue": {"fields": {...}}}`). Documents in
//! Firelens are plain JSON, so values are unwrapped on read and wrapped on
//! write. Types without a JSON counterpart (timestamps, references, bytes)
//! are read as strings; geo points as `{latitude, longitude}` objects.

use serde_json::{Map, Number, Value, json};

/// Decode a Firestore `fields` map into plain JSON fields
pub fn decode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), decode_value(v)))
        .collect()
}

/// Decode one Firestore typed value
pub fn decode_value(typed: &Value) -> Value {
    let Some(obj) = typed.as_object() else {
        return typed.clone();
    };
    let Some((kind, inner)) = obj.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => Value::Bool(inner.as_bool().unwrap_or(false)),
        "integerValue" => decode_integer(inner),
        "doubleValue" => decode_double(inner),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => {
            Value::String(inner.as_str().unwrap_or_default().to_string())
        }
        "geoPointValue" => json!({
            "latitude": inner.get("latitude").cloned().unwrap_or(json!(0.0)),
            "longitude": inner.get("longitude").cloned().unwrap_or(json!(0.0)),
        }),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "mapValue" => Value::Object(
            inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default(),
        ),
        other => {
            tracing::warn!(kind = %other, "unknown Firestore value type, keeping raw value");
            inner.clone()
        }
    }
}

fn decode_integer(inner: &Value) -> Value {
    // int64 values travel as decimal strings
    match inner {
        Value::String(s) => s
            .parse::<i64>()
            .map(|i| Value::Number(i.into()))
            .unwrap_or_else(|_| Value::String(s.clone())),
        Value::Number(n) => Value::Number(n.clone()),
        other => other.clone(),
    }
}

fn decode_double(inner: &Value) -> Value {
    match inner {
        Value::Number(n) => Value::Number(n.clone()),
        // NaN and the infinities arrive as strings and have no JSON number form
        Value::String(s) => s
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(s.clone())),
        other => other.clone(),
    }
}

/// Encode plain JSON fields as a Firestore `fields` map
pub fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect()
}

/// Encode one JSON value as a Firestore typed value
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64().unwrap_or(0.0) })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(values) => json!({
            "arrayValue": { "values": values.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(fields) => json!({
            "mapValue": { "fields": encode_fields(fields) }
        }),
    }
}

/// Quote a top-level field name for use in an update mask.
///
/// Simple identifiers are used verbatim; anything else is wrapped in
/// backticks with backticks and backslashes escaped.
pub fn quote_field_path(field: &str) -> String {
    let mut chars = field.chars();
    let simple = matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric());
    if simple {
        field.to_string()
    } else {
        let escaped = field.replace('\\', "\\\\").replace('`', "\\`");
        format!("`{}`", escaped)
    }
}
