//! Translation payload definitions

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

/// Top-level key map of one translation payload.
pub type Payload = HashMap<String, TranslationValue>;

/// A translated string or a nested group of translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationValue {
    Text(String),
    Node(HashMap<String, TranslationValue>),
    /// `null` in the source payload. Always resolves as a miss.
    Null,
}

impl TranslationValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    #[must_use]
    pub const fn as_node(&self) -> Option<&HashMap<String, Self>> {
        match self {
            Self::Node(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the text when this is a non-empty string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

impl From<&Value> for TranslationValue {
    fn from(json: &Value) -> Self {
        match json {
            Value::Object(map) => {
                Self::Node(map.iter().map(|(key, value)| (key.clone(), Self::from(value))).collect())
            }
            Value::Array(arr) => Self::Node(
                arr.iter()
                    .enumerate()
                    .map(|(index, value)| (index.to_string(), Self::from(value)))
                    .collect(),
            ),
            Value::String(s) => Self::Text(s.clone()),
            Value::Null => Self::Null,
            Value::Bool(_) | Value::Number(_) => Self::Text(json.to_string()),
        }
    }
}

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Translation payload must be a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// Converts a parsed JSON document into a payload.
///
/// # Errors
/// Returns error if the document root is not an object.
pub fn payload_from_json(json: &Value) -> Result<Payload, PayloadError> {
    let Value::Object(map) = json else {
        return Err(PayloadError::NotAnObject(json_kind(json)));
    };

    Ok(map.iter().map(|(key, value)| (key.clone(), TranslationValue::from(value))).collect())
}

/// Parses payload text.
///
/// # Errors
/// Returns error if JSON parse fails or the root is not an object.
pub fn parse_payload(text: &str) -> Result<Payload, PayloadError> {
    let json: Value = serde_json::from_str(text)?;
    payload_from_json(&json)
}

const fn json_kind(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Flatten a payload into a separator-joined key map.
///
/// `null` entries are skipped; they never resolve to a value.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use l10n_service::input::translation::{flatten_payload, payload_from_json};
///
/// let payload = payload_from_json(&json!({
///     "common": {
///         "hello": "Hello",
///         "goodbye": "Goodbye"
///     }
/// }))
/// .unwrap();
///
/// let flattened = flatten_payload(&payload, ".");
/// assert_eq!(flattened.get("common.hello"), Some(&"Hello".to_string()));
/// assert_eq!(flattened.get("common.goodbye"), Some(&"Goodbye".to_string()));
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn flatten_payload(payload: &Payload, separator: &str) -> HashMap<String, String> {
    let mut result = HashMap::new();
    for (key, value) in payload {
        flatten_value(value, separator, key, &mut result);
    }
    result
}

fn flatten_value(
    value: &TranslationValue,
    separator: &str,
    prefix: &str,
    result: &mut HashMap<String, String>,
) {
    match value {
        TranslationValue::Node(map) => {
            for (key, child) in map {
                flatten_value(child, separator, &format!("{prefix}{separator}{key}"), result);
            }
        }
        TranslationValue::Text(text) => {
            result.insert(prefix.to_string(), text.clone());
        }
        TranslationValue::Null => {}
    }
}
