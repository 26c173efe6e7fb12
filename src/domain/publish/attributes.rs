//! Attribute coercion: generic key-value bag to ordered string pairs.

use serde_json::Value;
use thiserror::Error;

/// Failure to coerce an attribute bag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("attributes must be a key-value object, got {found}")]
    NotAnObject { found: &'static str },

    #[error("attribute '{key}' has unsupported {found} value")]
    UnsupportedValue { key: String, found: &'static str },
}

/// Message attributes in insertion order.
///
/// Keys are unique; iteration follows the order in which the bag
/// presented them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    /// Coerces a generic bag into string attributes.
    ///
    /// Strings pass through unchanged; numbers and booleans use their JSON
    /// text. `null`, arrays and nested objects are rejected, as is any bag
    /// that is not an object.
    pub fn from_value(bag: &Value) -> Result<Self, AttributeError> {
        let map = bag.as_object().ok_or(AttributeError::NotAnObject {
            found: kind_of(bag),
        })?;

        let mut pairs = Vec::with_capacity(map.len());
        for (key, value) in map {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(AttributeError::UnsupportedValue {
                        key: key.clone(),
                        found: kind_of(other),
                    })
                }
            };
            pairs.push((key.clone(), text));
        }
        Ok(Self(pairs))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total bytes of keys and values.
    pub fn byte_len(&self) -> usize {
        self.0.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
