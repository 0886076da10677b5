//! Dynamic catalog item

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::FetchError;

/// One loosely typed record from a catalog endpoint.
///
/// Items hold field values as a `HashMap<String, Value>` with no fixed
/// schema. Columns declare which keys they read; the item itself knows
/// nothing about them.
///
/// # Example
///
/// ```
/// use catalog_lib::model::Item;
///
/// let item = Item::new()
///     .set("id", "GP-12")
///     .set("name", "Field Radio");
///
/// assert_eq!(item.get_str("name"), Some("Field Radio"));
/// assert!(item.get("missing").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    fields: HashMap<String, Value>,
}

impl Item {
    /// Creates an empty item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list of items from a JSON array of objects.
    ///
    /// Any other payload shape is a parse error.
    pub fn list_from_json(payload: &serde_json::Value) -> Result<Vec<Item>, FetchError> {
        let serde_json::Value::Array(entries) = payload else {
            return Err(FetchError::parse(format!(
                "expected a JSON array of items, got {}",
                json_kind(payload)
            )));
        };

        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Item::from_json(entry).ok_or_else(|| {
                    FetchError::parse(format!(
                        "item {} is a JSON {}, expected an object",
                        index,
                        json_kind(entry)
                    ))
                })
            })
            .collect()
    }

    /// Builds an item from a JSON object, or `None` for any other value.
    pub fn from_json(value: &serde_json::Value) -> Option<Item> {
        let object = value.as_object()?;
        Some(Self {
            fields: object
                .iter()
                .map(|(key, value)| (key.clone(), Value::from(value.clone())))
                .collect(),
        })
    }

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field as a string slice if it holds a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Returns `true` if the item contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns a mutable reference to all fields.
    pub fn fields_mut(&mut self) -> &mut HashMap<String, Value> {
        &mut self.fields
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_list_from_json() {
        let payload = json!([
            {"id": "A", "name": "Zebra", "tags": ["x", "y"]},
            {"id": "B", "name": null, "count": 3}
        ]);

        let items = Item::list_from_json(&payload).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].get_str("name"), Some("Zebra"));
        assert_eq!(items[0].get("tags"), Some(&Value::from(vec!["x", "y"])));
        assert_eq!(items[1].get("name"), Some(&Value::Null));
        assert_eq!(items[1].get("count"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_list_from_json_rejects_envelope() {
        let payload = json!({"data": []});
        let err = Item::list_from_json(&payload).unwrap_err();
        assert!(err.to_string().contains("expected a JSON array"));
    }

    #[test]
    fn test_list_from_json_rejects_scalar_entry() {
        let payload = json!([{"id": "A"}, 7]);
        let err = Item::list_from_json(&payload).unwrap_err();
        assert!(err.to_string().contains("item 1"));
    }

    #[test]
    fn test_deserialize_transparent() {
        let item: Item = serde_json::from_str(r#"{"name": "Service", "tier": 2}"#).unwrap();
        assert_eq!(item.get_str("name"), Some("Service"));
        assert_eq!(item.get("tier"), Some(&Value::Int(2)));
    }
}
