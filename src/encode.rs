//! Text encoding and conversions between [`JsonValue`] and other `serde` types.

use std::fmt;
use std::io;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter};

use crate::error::EncodeError;
use crate::value::{JsonObject, JsonValue};

/// How [`JsonValue::encode_with`] lays out its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub pretty: bool,
    /// Spaces per nesting level. Only used when `pretty` is set.
    pub indent: usize,
    /// Sort every object's keys instead of keeping map order.
    pub sort_keys: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            pretty: false,
            indent: 2,
            sort_keys: false,
        }
    }
}

impl JsonValue {
    pub fn to_string_pretty(&self) -> String {
        self.encode_with(&EncodeOptions {
            pretty: true,
            ..EncodeOptions::default()
        })
    }

    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_to_writer(&mut buf, &EncodeOptions::default())
            .expect("encoding a JsonValue into a Vec cannot fail");
        buf
    }

    pub fn to_writer<W: io::Write>(&self, writer: W) -> Result<(), EncodeError> {
        self.encode_to_writer(writer, &EncodeOptions::default())
    }

    pub fn encode_with(&self, options: &EncodeOptions) -> String {
        let mut buf = Vec::new();
        self.encode_to_writer(&mut buf, options)
            .expect("encoding a JsonValue into a Vec cannot fail");
        String::from_utf8(buf).expect("serde_json writes UTF-8")
    }

    pub fn encode_to_writer<W: io::Write>(
        &self,
        writer: W,
        options: &EncodeOptions,
    ) -> Result<(), EncodeError> {
        if options.sort_keys {
            return self.sorted().encode_to_writer(
                writer,
                &EncodeOptions {
                    sort_keys: false,
                    ..*options
                },
            );
        }

        if options.pretty {
            let indent = vec![b' '; options.indent];
            let mut ser =
                serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(&indent));
            self.serialize(&mut ser)?;
        } else {
            let mut ser = serde_json::Serializer::with_formatter(writer, CompactFormatter);
            self.serialize(&mut ser)?;
        }
        Ok(())
    }

    /// A copy with the keys of every object, at any depth, in sorted order.
    #[must_use]
    pub fn sorted(&self) -> JsonValue {
        match self {
            JsonValue::Object(object) => {
                let mut sorted: JsonObject = object
                    .iter()
                    .map(|(key, value)| (key.clone(), value.sorted()))
                    .collect();
                sorted.sort_keys();
                JsonValue::Object(sorted)
            }
            JsonValue::Array(array) => JsonValue::Array(array.iter().map(JsonValue::sorted).collect()),
            other => other.clone(),
        }
    }

    /// Encodes any `Serialize` type into a [`JsonValue`].
    pub fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<JsonValue, EncodeError> {
        Ok(serde_json::to_value(value)?.into())
    }

    /// Decodes a `T` out of this value.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.clone().into())
    }
}

/// Encodes `value` and keeps the result only if it is an object.
pub fn to_object<T: Serialize + ?Sized>(value: &T) -> Option<JsonObject> {
    match JsonValue::from_serializable(value).ok()? {
        JsonValue::Object(object) => Some(object),
        _ => None,
    }
}

/// Encodes `value` as compact JSON bytes, or `None` if it has no JSON form.
pub fn to_data<T: Serialize + ?Sized>(value: &T) -> Option<Vec<u8>> {
    serde_json::to_vec(value).ok()
}

/// `{}` prints compact JSON, `{:#}` prints it indented.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = EncodeOptions {
            pretty: f.alternate(),
            ..EncodeOptions::default()
        };
        f.write_str(&self.encode_with(&options))
    }
}

impl From<serde_json::Value> for JsonValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => JsonValue::Null,
            serde_json::Value::Bool(value) => JsonValue::Bool(value),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(value) => JsonValue::Int(value),
                None => number.as_f64().map_or(JsonValue::Null, JsonValue::Double),
            },
            serde_json::Value::String(value) => JsonValue::String(value),
            serde_json::Value::Array(array) => {
                JsonValue::Array(array.into_iter().map(JsonValue::from).collect())
            }
            serde_json::Value::Object(object) => JsonValue::Object(
                object
                    .into_iter()
                    .map(|(key, value)| (key, JsonValue::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<JsonValue> for serde_json::Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::String(value) => serde_json::Value::String(value),
            JsonValue::Int(value) => serde_json::Value::Number(value.into()),
            // serde_json has no representation for NaN or infinities and writes them as `null`.
            JsonValue::Double(value) => serde_json::Number::from_f64(value)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            JsonValue::Bool(value) => serde_json::Value::Bool(value),
            JsonValue::Object(object) => serde_json::Value::Object(
                object
                    .into_iter()
                    .map(|(key, value)| (key, serde_json::Value::from(value)))
                    .collect(),
            ),
            JsonValue::Array(array) => {
                serde_json::Value::Array(array.into_iter().map(serde_json::Value::from).collect())
            }
            JsonValue::Null => serde_json::Value::Null,
        }
    }
}
