//! Conversions between dynamic document values and their text forms

use serde_json::{Number, Value};

/// Plain string form of a value, as shown in table cells and CSV rows.
///
/// Strings are rendered verbatim, null as the empty string, and structured
/// values as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Editable text form used by the field-list editor.
///
/// Unlike [`display_value`], null renders as `null` so that an unedited
/// field parses back to the same value.
pub fn edit_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse text as JSON, falling back to the literal string
pub fn parse_loose_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Parse the contents of an inline table cell edit.
///
/// Text opening an object or array is parsed as JSON; non-blank numeric text
/// becomes a number; anything else stays a string.
pub fn parse_cell_value(text: &str) -> Value {
    if text.starts_with('{') || text.starts_with('[') {
        return parse_loose_value(text);
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::String(text.to_string());
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = trimmed.parse::<f64>()
        && let Some(n) = Number::from_f64(f)
    {
        return Value::Number(n);
    }
    Value::String(text.to_string())
}

/// Name of the value's variant, used in logs and diagnostics
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
