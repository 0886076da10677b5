//! Value enum for dynamic field values

use serde::Deserialize;
use serde::Serialize;

/// A dynamic value held by one field of an [`Item`](super::Item).
///
/// Catalog endpoints return loosely typed records, so a field may hold a
/// string on one row, a number on the next and be missing entirely on a third.
///
/// # Type Mapping
///
/// | JSON | Rust Variant |
/// |------|--------------|
/// | null | `Null` |
/// | true/false | `Bool` |
/// | integer | `Int` |
/// | other number | `Float` |
/// | string | `String` |
/// | array | `Array` |
/// | object | `Json` |
///
/// # Example
///
/// ```
/// use catalog_lib::model::Value;
///
/// let name = Value::from("Logistics");
/// let tags = Value::from(vec!["red", "blue"]);
/// assert_eq!(tags.display_text(), "red, blue");
/// assert_eq!(Value::Null.display_text(), "");
/// # let _ = name;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    String(String),
    /// Array of values, usually strings.
    Array(Vec<Value>),
    /// Fallback for nested objects and other unrecognized JSON values.
    Json(serde_json::Value),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Json(_) => "json",
        }
    }

    /// Returns the text shown for this value in a plain cell.
    ///
    /// Null becomes the empty string and arrays are joined with `", "`.
    pub fn display_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(values) => values
                .iter()
                .map(Value::display_text)
                .collect::<Vec<_>>()
                .join(", "),
            Value::Json(v) => v.to_string(),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(values) => {
                Value::Array(values.into_iter().map(Value::from).collect())
            }
            other @ serde_json::Value::Object(_) => Value::Json(other),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_number_prefers_int() {
        assert_eq!(Value::from(serde_json::json!(42)), Value::Int(42));
        assert_eq!(Value::from(serde_json::json!(1.5)), Value::Float(1.5));
    }

    #[test]
    fn test_from_json_object_falls_back() {
        let value = Value::from(serde_json::json!({"nested": true}));
        assert_eq!(value.type_name(), "json");
    }

    #[test]
    fn test_display_text_joins_arrays() {
        let value = Value::from(serde_json::json!(["Alpha", null, 3]));
        assert_eq!(value.display_text(), "Alpha, , 3");
    }

    #[test]
    fn test_untagged_deserialize() {
        let value: Value = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        assert_eq!(value, Value::from(vec!["a", "b"]));

        let value: Value = serde_json::from_str("null").unwrap();
        assert!(value.is_null());
    }
}
