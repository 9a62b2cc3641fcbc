//! Decoding JSON text into a [`JsonValue`].
//!
//! Text goes through [`crate::parser`] first, then [`lower`] turns the syntax tree into a value.
//! The variant order of the decode contract is string, integer, double, bool, object, array,
//! null. Only numbers can match more than one of those, so that is where the order shows up:
//! the integer reading is tried before the double reading.

use std::str::FromStr;

use chumsky::Parser;
use tracing::*;

use crate::error::DecodeError;
use crate::parser::{parser, Json};
use crate::path::JsonPath;
use crate::spanned::Spanned;
use crate::value::{JsonObject, JsonValue};

/// How deeply arrays and objects may nest in decoded text.
pub const MAX_DEPTH: usize = 128;

/// Everything learned from one decoding pass, for front ends that report diagnostics.
#[derive(Debug, Clone)]
pub struct Decoded {
    /// The syntax tree, present whenever the parser could recover enough structure.
    pub tree: Option<Spanned<Json>>,
    /// The decoded value, present only when `errors` is empty.
    pub value: Option<JsonValue>,
    pub errors: Vec<DecodeError>,
}

pub fn decode_spanned(src: &str) -> Decoded {
    // The parser recurses once per level, so reject deep input before it runs.
    if let Some(offset) = excess_nesting(src) {
        debug!(offset, "nesting limit exceeded");
        return Decoded {
            tree: None,
            value: None,
            errors: vec![DecodeError::type_mismatch(
                path_at(src, offset),
                Some(offset..offset + 1),
                format!("nesting deeper than {MAX_DEPTH} levels"),
            )],
        };
    }

    let (tree, syntax_errors) = parser().parse(src).into_output_errors();

    let mut errors: Vec<DecodeError> = syntax_errors
        .iter()
        .map(|e| {
            DecodeError::type_mismatch(
                path_at(src, e.span().start),
                Some(e.span().into_range()),
                e.to_string(),
            )
        })
        .collect();
    debug!(syntax_errors = errors.len(), recovered = tree.is_some());

    let value = match &tree {
        Some(tree) if errors.is_empty() => match lower(tree) {
            Ok(value) => Some(value),
            Err(error) => {
                errors.push(error);
                None
            }
        },
        _ => None,
    };

    Decoded {
        tree,
        value,
        errors,
    }
}

/// Decodes `src`, failing with the first error found.
pub fn decode_str(src: &str) -> Result<JsonValue, DecodeError> {
    let Decoded { value, errors, .. } = decode_spanned(src);
    if let Some(error) = errors.into_iter().next() {
        return Err(error);
    }
    value.ok_or_else(|| DecodeError::type_mismatch(JsonPath::root(), None, "not a JSON value"))
}

pub fn decode_slice(bytes: &[u8]) -> Result<JsonValue, DecodeError> {
    let src = std::str::from_utf8(bytes).map_err(|e| {
        let offset = e.valid_up_to();
        DecodeError::type_mismatch(
            JsonPath::root(),
            Some(offset..offset + e.error_len().unwrap_or(0)),
            format!("invalid UTF-8 at byte {offset}"),
        )
    })?;
    decode_str(src)
}

impl FromStr for JsonValue {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_str(s)
    }
}

/// Turns a syntax tree into a value.
pub fn lower(tree: &Spanned<Json>) -> Result<JsonValue, DecodeError> {
    lower_at(tree, &mut JsonPath::root())
}

fn lower_at(node: &Spanned<Json>, path: &mut JsonPath) -> Result<JsonValue, DecodeError> {
    let mismatch = |path: &JsonPath, reason: String| {
        DecodeError::type_mismatch(path.clone(), Some(node.range()), reason)
    };

    Ok(match &node.val {
        Json::Object(_) | Json::Array(_) if path.segments().len() >= MAX_DEPTH => {
            return Err(mismatch(path, format!("nesting deeper than {MAX_DEPTH} levels")));
        }
        Json::Str(value) => JsonValue::String(value.clone()),
        Json::Num(text) => lower_number(text)
            .ok_or_else(|| mismatch(path, format!("number `{text}` is out of range")))?,
        Json::Bool(value) => JsonValue::Bool(*value),
        Json::Object(members) => {
            let mut object = JsonObject::with_capacity(members.len());
            for (key, member) in members {
                path.push_key(&key.val);
                let value = lower_at(member, path);
                path.pop();
                // A repeated key keeps its first position but takes the last value.
                object.insert(key.val.clone(), value?);
            }
            JsonValue::Object(object)
        }
        Json::Array(items) => {
            let mut array = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                path.push_index(index);
                let value = lower_at(item, path);
                path.pop();
                array.push(value?);
            }
            JsonValue::Array(array)
        }
        Json::Null => JsonValue::Null,
        Json::Invalid => return Err(mismatch(path, "not a JSON value".to_owned())),
    })
}

/// `i64` first, then a finite `f64`. The integer parse rejects any fraction or exponent, so
/// `3.0` and `1e2` are doubles even though their value is integral. `-0` is a double as well:
/// it has no `i64` form, and `serde_json` reports it as `-0.0`.
fn lower_number(text: &str) -> Option<JsonValue> {
    let int = text
        .parse::<i64>()
        .ok()
        .filter(|&value| value != 0 || !text.starts_with('-'));
    int.map(JsonValue::Int).or_else(|| {
        text.parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(JsonValue::Double)
    })
}

/// Offset of the first `[` or `{` that opens a level beyond [`MAX_DEPTH`].
fn excess_nesting(src: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, c) in src.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '[' | '{' => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Some(offset);
                }
            }
            ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

enum Frame {
    Object { key: Option<String>, in_value: bool },
    Array { index: usize },
}

/// Works out which value `offset` falls into by scanning the text before it.
///
/// This has to cope with input that failed to parse, so it only tracks brackets, keys and
/// commas. An offset inside an object key resolves to the enclosing object.
fn path_at(src: &str, offset: usize) -> JsonPath {
    let prefix = src.get(..offset).unwrap_or(src);
    let mut frames: Vec<Frame> = Vec::new();
    let mut chars = prefix.char_indices();

    while let Some((start, c)) = chars.next() {
        match c {
            '"' => {
                let mut escaped = false;
                let mut end = None;
                for (i, c) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else if c == '"' {
                        end = Some(i);
                        break;
                    }
                }
                // Unterminated: the offset is inside this string.
                let Some(end) = end else { break };
                if let Some(Frame::Object {
                    key,
                    in_value: false,
                }) = frames.last_mut()
                {
                    let quoted = &prefix[start..=end];
                    *key = Some(
                        serde_json::from_str(quoted)
                            .unwrap_or_else(|_| quoted[1..quoted.len() - 1].to_owned()),
                    );
                }
            }
            '{' => frames.push(Frame::Object {
                key: None,
                in_value: false,
            }),
            '[' => frames.push(Frame::Array { index: 0 }),
            '}' | ']' => {
                frames.pop();
            }
            ':' => {
                if let Some(Frame::Object { in_value, .. }) = frames.last_mut() {
                    *in_value = true;
                }
            }
            ',' => match frames.last_mut() {
                Some(Frame::Object { key, in_value }) => {
                    *key = None;
                    *in_value = false;
                }
                Some(Frame::Array { index }) => *index += 1,
                None => {}
            },
            _ => {}
        }
    }

    let mut path = JsonPath::root();
    for frame in frames {
        match frame {
            Frame::Object {
                key: Some(key),
                in_value: true,
            } => path.push_key(&key),
            Frame::Object { .. } => break,
            Frame::Array { index } => path.push_index(index),
        }
    }
    path
}
