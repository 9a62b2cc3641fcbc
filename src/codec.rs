//! `serde` support for [`JsonValue`].
//!
//! Decoding goes through [`JsonValueSeed`], which carries the current [`LazyPath`] into every
//! nested value. Whatever `Deserializer` is driving, a value that matches no variant is rejected
//! with a message naming its path.

use std::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use tracing::*;

use crate::path::LazyPath;
use crate::value::{JsonObject, JsonValue};

impl Serialize for JsonValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonValue::String(value) => serializer.serialize_str(value),
            JsonValue::Int(value) => serializer.serialize_i64(*value),
            JsonValue::Double(value) => serializer.serialize_f64(*value),
            JsonValue::Bool(value) => serializer.serialize_bool(*value),
            JsonValue::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (key, value) in object {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            JsonValue::Array(array) => serializer.collect_seq(array),
            JsonValue::Null => serializer.serialize_unit(),
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        JsonValueSeed::new(&LazyPath::root()).deserialize(deserializer)
    }
}

/// Decodes one [`JsonValue`] located at `path`.
///
/// Use this instead of [`JsonValue::deserialize`] when the value being decoded is itself nested
/// in a larger document, so that errors name the full path.
#[derive(Debug, Clone, Copy)]
pub struct JsonValueSeed<'p> {
    path: &'p LazyPath<'p>,
}

impl<'p> JsonValueSeed<'p> {
    pub fn new(path: &'p LazyPath<'p>) -> Self {
        JsonValueSeed { path }
    }
}

impl<'de> DeserializeSeed<'de> for JsonValueSeed<'_> {
    type Value = JsonValue;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(JsonValueVisitor { path: self.path })
    }
}

struct JsonValueVisitor<'p> {
    path: &'p LazyPath<'p>,
}

impl JsonValueVisitor<'_> {
    fn mismatch<E: de::Error>(&self, found: impl fmt::Display) -> E {
        debug!(path = %self.path, %found, "no JSON variant matched");
        E::custom(format_args!(
            "type mismatch at {}: {found} is not a JSON value",
            self.path
        ))
    }

    fn integer<E: de::Error>(&self, value: i128) -> Result<JsonValue, E> {
        match i64::try_from(value) {
            Ok(value) => Ok(JsonValue::Int(value)),
            // Out of `Int` range, so the next variant in line gets its chance.
            Err(_) => self.double(value as f64),
        }
    }

    fn double<E: de::Error>(&self, value: f64) -> Result<JsonValue, E> {
        if value.is_finite() {
            Ok(JsonValue::Double(value))
        } else {
            Err(self.mismatch(format_args!("non-finite number `{value}`")))
        }
    }
}

impl<'de> Visitor<'de> for JsonValueVisitor<'_> {
    type Value = JsonValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a JSON value at {}", self.path)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(JsonValue::String(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(JsonValue::String(value))
    }

    fn visit_char<E: de::Error>(self, value: char) -> Result<Self::Value, E> {
        Ok(JsonValue::String(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(JsonValue::Int(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        self.integer(i128::from(value))
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<Self::Value, E> {
        self.integer(value)
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<Self::Value, E> {
        match i128::try_from(value) {
            Ok(value) => self.integer(value),
            Err(_) => self.double(value as f64),
        }
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        self.double(value)
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(JsonValue::Bool(value))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = JsonObject::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<String>()? {
            let value = {
                let path = self.path.push_key(&key);
                map.next_value_seed(JsonValueSeed::new(&path))?
            };
            object.insert(key, value);
        }
        Ok(JsonValue::Object(object))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut array = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        loop {
            let path = self.path.push_index(array.len());
            match seq.next_element_seed(JsonValueSeed::new(&path))? {
                Some(value) => array.push(value),
                None => break,
            }
        }
        Ok(JsonValue::Array(array))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(JsonValue::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(JsonValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        JsonValueSeed::new(self.path).deserialize(deserializer)
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        JsonValueSeed::new(self.path).deserialize(deserializer)
    }

    fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
        Err(self.mismatch(format_args!("a byte string of length {}", value.len())))
    }

    fn visit_enum<A>(self, _data: A) -> Result<Self::Value, A::Error>
    where
        A: de::EnumAccess<'de>,
    {
        Err(self.mismatch("an enum"))
    }
}

#[cfg(test)]
mod tests {
    use serde::de::value::{
        CharDeserializer, Error as ValueError, F64Deserializer, I128Deserializer,
        MapDeserializer, SeqDeserializer, U128Deserializer,
    };
    use serde::de::IntoDeserializer;

    use super::*;

    fn from_json(text: &str) -> JsonValue {
        serde_json::from_str(text).expect("valid JSON")
    }

    #[test]
    fn integers_prefer_int() {
        assert_eq!(from_json("3"), JsonValue::Int(3));
        assert_eq!(from_json("-42"), JsonValue::Int(-42));
        assert_eq!(from_json("9223372036854775807"), JsonValue::Int(i64::MAX));
    }

    #[test]
    fn fractions_and_exponents_are_doubles() {
        assert_eq!(from_json("3.5"), JsonValue::Double(3.5));
        assert_eq!(from_json("3.0"), JsonValue::Double(3.0));
        assert_eq!(from_json("1e3"), JsonValue::Double(1000.0));
    }

    #[test]
    fn integers_beyond_i64_fall_through_to_double() {
        assert_eq!(
            from_json("18446744073709551615"),
            JsonValue::Double(18_446_744_073_709_551_615.0)
        );
    }

    #[test]
    fn nested_document() {
        let value = from_json(r#"{"a": [1, "x", true, null]}"#);
        let expected = JsonValue::from_iter([(
            "a",
            JsonValue::Array(vec![
                JsonValue::Int(1),
                JsonValue::from("x"),
                JsonValue::Bool(true),
                JsonValue::Null,
            ]),
        )]);
        assert_eq!(value, expected);
    }

    #[test]
    fn later_duplicate_key_wins() {
        assert_eq!(
            from_json(r#"{"a": 1, "a": 2}"#),
            JsonValue::from_iter([("a", 2)])
        );
    }

    #[test]
    fn encodes_structurally() {
        let value = JsonValue::from_iter([
            ("s", JsonValue::from("x")),
            ("i", JsonValue::Int(1)),
            ("d", JsonValue::Double(1.5)),
            ("b", JsonValue::Bool(false)),
            ("n", JsonValue::Null),
            ("a", JsonValue::Array(vec![])),
        ]);
        assert_eq!(
            serde_json::to_string(&value).expect("encodes"),
            r#"{"s":"x","i":1,"d":1.5,"b":false,"n":null,"a":[]}"#
        );
    }

    #[test]
    fn doubles_keep_a_fraction_when_encoded() {
        let text = serde_json::to_string(&JsonValue::Double(3.0)).expect("encodes");
        assert_eq!(text, "3.0");
        assert_eq!(from_json(&text), JsonValue::Double(3.0));
    }

    #[test]
    fn chars_and_wide_integers_from_other_deserializers() {
        let de: CharDeserializer<ValueError> = 'x'.into_deserializer();
        assert_eq!(JsonValue::deserialize(de).expect("char decodes"), JsonValue::from("x"));

        let de: I128Deserializer<ValueError> = 7_i128.into_deserializer();
        assert_eq!(JsonValue::deserialize(de).expect("i128 decodes"), JsonValue::Int(7));

        let de: U128Deserializer<ValueError> = u128::MAX.into_deserializer();
        let value = JsonValue::deserialize(de).expect("u128 decodes");
        assert_eq!(value.kind_desc(), "double");
    }

    #[test]
    fn mismatch_at_root_names_the_root() {
        let de: F64Deserializer<ValueError> = f64::NAN.into_deserializer();
        let error = JsonValue::deserialize(de).expect_err("NaN is not JSON");
        let message = error.to_string();
        assert!(message.starts_with("type mismatch at $:"), "{message}");
    }

    #[test]
    fn mismatch_in_array_names_the_index() {
        let seq: SeqDeserializer<_, ValueError> =
            SeqDeserializer::new(vec![1.0_f64, f64::INFINITY].into_iter());
        let error = JsonValue::deserialize(seq).expect_err("infinity is not JSON");
        assert!(error.to_string().contains("type mismatch at $[1]"), "{error}");
    }

    #[test]
    fn mismatch_in_object_names_the_key() {
        let map: MapDeserializer<'_, _, ValueError> =
            MapDeserializer::new(vec![("ok", 1.0_f64), ("bad", f64::NAN)].into_iter());
        let error = JsonValue::deserialize(map).expect_err("NaN is not JSON");
        assert!(error.to_string().contains("type mismatch at $.bad"), "{error}");
    }
}
