//! Boundary value shapes.
//!
//! In memory the canonical form is always a model instance; mappings and
//! JSON text exist only transiently at the database and form edges.

use serde_json::{Map, Value};

/// A raw boundary form: the shapes a backing store or bulk loader hands
/// over before any validation has run.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// A decoded but unvalidated JSON mapping
    Mapping(Map<String, Value>),
    /// Stored JSON text
    Text(String),
}

impl RawValue {
    /// Lifts the raw form into the column input dispatch.
    pub fn into_input<T>(self) -> FieldInput<T> {
        match self {
            RawValue::Mapping(map) => FieldInput::Mapping(map),
            RawValue::Text(text) => FieldInput::Text(text),
        }
    }
}

impl From<Map<String, Value>> for RawValue {
    fn from(map: Map<String, Value>) -> Self {
        RawValue::Mapping(map)
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        RawValue::Text(text)
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_string())
    }
}

/// Every shape a column operation accepts: a model instance, a raw
/// mapping, JSON text, or null.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput<T> {
    /// Already-validated model instance
    Model(T),
    /// Raw JSON mapping
    Mapping(Map<String, Value>),
    /// JSON text
    Text(String),
    /// SQL NULL / absent value
    Null,
}

impl<T> From<Map<String, Value>> for FieldInput<T> {
    fn from(map: Map<String, Value>) -> Self {
        FieldInput::Mapping(map)
    }
}

impl<T> From<String> for FieldInput<T> {
    fn from(text: String) -> Self {
        FieldInput::Text(text)
    }
}

impl<T> From<&str> for FieldInput<T> {
    fn from(text: &str) -> Self {
        FieldInput::Text(text.to_string())
    }
}

/// JSON values dispatch by their own shape: objects become mappings,
/// null becomes Null, and anything else is treated as JSON text would
/// be after decoding, wrapped back into a text form.
impl<T> From<Value> for FieldInput<T> {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => FieldInput::Mapping(map),
            Value::Null => FieldInput::Null,
            Value::String(text) => FieldInput::Text(text),
            other => FieldInput::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_object_becomes_mapping() {
        let input: FieldInput<()> = json!({"a": 1}).into();
        assert!(matches!(input, FieldInput::Mapping(_)));
    }

    #[test]
    fn test_value_null_becomes_null() {
        let input: FieldInput<()> = Value::Null.into();
        assert!(matches!(input, FieldInput::Null));
    }

    #[test]
    fn test_str_becomes_text() {
        let input: FieldInput<()> = r#"{"a": 1}"#.into();
        assert!(matches!(input, FieldInput::Text(_)));
    }

    #[test]
    fn test_raw_value_lifts_into_input() {
        let raw = RawValue::from("{}");
        assert!(matches!(raw.into_input::<()>(), FieldInput::Text(_)));
    }
}
