//! The dynamic JSON value type.

use indexmap::IndexMap;

use crate::keypath::KeyPath;
use crate::object::ObjectExt;

/// The payload of [`JsonValue::Object`]. Iteration follows insertion order, equality does not.
pub type JsonObject = IndexMap<String, JsonValue>;

/// A JSON document held as a closed sum type.
///
/// Numbers are split in two: integers that fit in an `i64` are [`JsonValue::Int`], every other
/// number is a [`JsonValue::Double`]. The two never compare equal, so `Int(3) != Double(3.0)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    String(String),
    Int(i64),
    Double(f64),
    Bool(bool),
    Object(JsonObject),
    Array(Vec<JsonValue>),
    #[default]
    Null,
}

impl JsonValue {
    pub fn kind_desc(&self) -> &'static str {
        match self {
            JsonValue::String(_) => "string",
            JsonValue::Int(_) => "int",
            JsonValue::Double(_) => "double",
            JsonValue::Bool(_) => "bool",
            JsonValue::Object(_) => "object",
            JsonValue::Array(_) => "array",
            JsonValue::Null => "null",
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            JsonValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            JsonValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            JsonValue::Double(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(value) => Some(value.as_slice()),
            _ => None,
        }
    }

    /// `Some(())` for [`JsonValue::Null`], so that a null can be told apart from a mismatch.
    pub fn as_null(&self) -> Option<()> {
        match self {
            JsonValue::Null => Some(()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Looks up `key` if this is an object.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object()?.get(key)
    }

    /// Looks up element `index` if this is an array and the index is in bounds.
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        self.as_array()?.get(index)
    }

    /// Follows a dotted key path through nested objects. See [`ObjectExt::get_key_path`].
    pub fn get_key_path(&self, key_path: &KeyPath) -> Option<&JsonValue> {
        self.as_object()?.get_key_path(key_path)
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_owned())
    }
}

impl From<char> for JsonValue {
    fn from(value: char) -> Self {
        JsonValue::String(value.to_string())
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for JsonValue {
                fn from(value: $ty) -> Self {
                    JsonValue::Int(i64::from(value))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for JsonValue {
    fn from(value: f32) -> Self {
        JsonValue::Double(f64::from(value))
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Double(value)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(value: JsonObject) -> Self {
        JsonValue::Object(value)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(value: Vec<JsonValue>) -> Self {
        JsonValue::Array(value)
    }
}

impl From<()> for JsonValue {
    fn from((): ()) -> Self {
        JsonValue::Null
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(JsonValue::Null, Into::into)
    }
}

impl FromIterator<JsonValue> for JsonValue {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        JsonValue::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>, V: Into<JsonValue>> FromIterator<(K, V)> for JsonValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        JsonValue::Object(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn every_variant() -> Vec<JsonValue> {
        vec![
            JsonValue::from("x"),
            JsonValue::from(1),
            JsonValue::from(1.5),
            JsonValue::from(true),
            JsonValue::from_iter([("k", 1)]),
            JsonValue::from_iter([JsonValue::Null]),
            JsonValue::Null,
        ]
    }

    #[test]
    fn accessors_match_only_their_own_variant() {
        for value in every_variant() {
            assert_eq!(value.as_string().is_some(), value.kind_desc() == "string");
            assert_eq!(value.as_int().is_some(), value.kind_desc() == "int");
            assert_eq!(value.as_double().is_some(), value.kind_desc() == "double");
            assert_eq!(value.as_bool().is_some(), value.kind_desc() == "bool");
            assert_eq!(value.as_object().is_some(), value.kind_desc() == "object");
            assert_eq!(value.as_array().is_some(), value.kind_desc() == "array");
            assert_eq!(value.as_null().is_some(), value.kind_desc() == "null");
        }
    }

    #[test]
    fn wrong_accessor_is_empty() {
        assert_eq!(JsonValue::from("x").as_int(), None);
        assert_eq!(JsonValue::Int(3).as_double(), None);
        assert_eq!(JsonValue::Double(3.0).as_int(), None);
        assert_eq!(JsonValue::Null.as_bool(), None);
    }

    #[test]
    fn equality_is_tag_sensitive() {
        assert_ne!(JsonValue::Int(3), JsonValue::Double(3.0));
        assert_ne!(JsonValue::from("1"), JsonValue::Int(1));
        assert_eq!(JsonValue::from(3_u8), JsonValue::Int(3));
    }

    #[test]
    fn object_equality_ignores_order() {
        let left = JsonValue::from_iter([("a", 1), ("b", 2)]);
        let right = JsonValue::from_iter([("b", 2), ("a", 1)]);
        assert_eq!(left, right);
    }

    #[test]
    fn array_equality_respects_order() {
        let left = JsonValue::from_iter([JsonValue::Int(1), JsonValue::Int(2)]);
        let right = JsonValue::from_iter([JsonValue::Int(2), JsonValue::Int(1)]);
        assert_ne!(left, right);
    }

    #[test]
    fn options_and_unit_become_null() {
        assert_eq!(JsonValue::from(None::<i64>), JsonValue::Null);
        assert_eq!(JsonValue::from(Some("x")), JsonValue::from("x"));
        assert_eq!(JsonValue::from(()), JsonValue::Null);
        assert_eq!(JsonValue::default(), JsonValue::Null);
    }

    #[test]
    fn safe_lookups() {
        let value = JsonValue::from_iter([("list", JsonValue::from_iter([JsonValue::Int(7)]))]);
        let list = value.get("list").expect("list is present");
        assert_eq!(list.get_index(0), Some(&JsonValue::Int(7)));
        assert_eq!(list.get_index(1), None);
        assert_eq!(list.get("list"), None);
        assert_eq!(value.get("missing"), None);
        assert_eq!(value.get_index(0), None);
    }
}
