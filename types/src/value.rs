//! Dynamic values carried through argument snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Shared `Unset` marker handed out by reads that find nothing.
pub static UNSET: Value = Value::Unset;

/// A dynamically typed value.
///
/// `Unset` marks a position or key that holds nothing at all. It is distinct from
/// `Null`, which is an explicit value supplied by a caller. Both serialize as
/// `null`; deserializing `null` always produces `Null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    #[default]
    Unset,
}

impl Value {
    pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn map(entries: impl IntoIterator<Item = (impl Into<String>, impl Into<Value>)>) -> Self {
        Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    #[must_use]
    pub fn empty_map() -> Self {
        Value::Map(BTreeMap::new())
    }

    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }

    /// Length of the value if it is a sequence.
    ///
    /// Only lists have a length; negative indices wrap around against it.
    #[must_use]
    pub fn length(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(items.len()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Consume the value as a list of items.
    ///
    /// Lists yield their items, `Unset` yields nothing, and anything else is a
    /// single item.
    #[must_use]
    pub fn into_items(self) -> Vec<Value> {
        match self {
            Value::List(items) => items,
            Value::Unset => Vec::new(),
            other => vec![other],
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Unset, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Value::Int)
                .or_else(|| n.as_f64().map(Value::Float))
                .unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Value;

    #[test]
    fn default_is_unset() {
        assert!(Value::default().is_unset());
        assert_ne!(Value::Unset, Value::Null);
    }

    #[test]
    fn from_json_keeps_shape() {
        let value = Value::from(json!(["foo", {"x": 3, "y": 4.5}, null]));
        assert_eq!(
            value,
            Value::list([
                Value::from("foo"),
                Value::map([("x", Value::from(3)), ("y", Value::from(4.5))]),
                Value::Null,
            ])
        );
    }

    #[test]
    fn into_items_spreads_lists_only() {
        assert_eq!(Value::list([1, 2]).into_items(), vec![Value::from(1), Value::from(2)]);
        assert_eq!(Value::from("a").into_items(), vec![Value::from("a")]);
        assert!(Value::Unset.into_items().is_empty());
    }

    #[test]
    fn only_lists_have_length() {
        assert_eq!(Value::list([1, 2, 3]).length(), Some(3));
        assert_eq!(Value::from("abc").length(), None);
        assert_eq!(Value::empty_map().length(), None);
    }

    #[test]
    fn none_converts_to_unset() {
        assert!(Value::from(None::<i64>).is_unset());
        assert_eq!(Value::from(Some(2)), Value::Int(2));
    }
}
