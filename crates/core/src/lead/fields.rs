//! Input normalizer: flattens an arbitrary JSON form body into [`Fields`].

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Raw request body as an ordered map of field name to arbitrary JSON.
pub type RawForm = IndexMap<String, Value>;

/// Normalized form: field name to text or list of text, in body order.
pub type Fields = IndexMap<String, FieldValue>;

/// A single normalized field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Every text item held by this value; a scalar yields exactly one.
    pub fn items(&self) -> &[String] {
        match self {
            FieldValue::Text(s) => std::slice::from_ref(s),
            FieldValue::List(items) => items,
        }
    }

    /// The value rendered for a notification line (lists joined with `", "`).
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }

    /// The scalar text, if this is not a list.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::List(_) => None,
        }
    }
}

/// Parse a request body into a [`RawForm`].
///
/// Anything that is not a JSON object (invalid JSON, arrays, scalars, an
/// empty body) is treated as an empty form.
pub fn parse_raw_form(body: &[u8]) -> RawForm {
    serde_json::from_slice::<RawForm>(body).unwrap_or_default()
}

/// Coerce every value of `raw` to text or a list of text.
pub fn normalize_fields(raw: &RawForm) -> Fields {
    raw.iter()
        .map(|(key, value)| {
            let normalized = match value {
                Value::Array(items) => FieldValue::List(items.iter().map(scalar_text).collect()),
                other => FieldValue::Text(scalar_text(other)),
            };
            (key.clone(), normalized)
        })
        .collect()
}

/// Text form of a single JSON value.
///
/// Nested arrays and objects are serialized as JSON text.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Whether the honeypot value carries anything a human would not have typed.
///
/// Falsy JSON (`null`, `false`, `0`, empty or blank strings, lists of blank
/// strings) leaves the trap empty.
pub fn is_trap_filled(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::Bool(true) | Value::Object(_) => true,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => items.iter().any(|v| !scalar_text(v).trim().is_empty()),
    }
}
