//! A dynamic JSON value with a fixed decoding order, and the helpers that usually travel with it.
//!
//! [`JsonValue`] has one variant per JSON shape, with numbers split into [`JsonValue::Int`] and
//! [`JsonValue::Double`]. Decoding tries the variants in a fixed order (string, integer, double,
//! bool, object, array, null), so an integral number such as `3` always becomes an `Int` and only
//! numbers that are not `i64` integers become a `Double`.
//!
//! Values can be decoded through any `serde` deserializer or from text with [`decode_str`]. The
//! text decoder keeps byte spans around so that front ends can point at the offending input.

mod codec;
mod decode;
mod encode;
mod error;
mod keypath;
mod nullable;
mod object;
pub mod parser;
mod path;
pub mod perf;
mod spanned;
mod value;

pub use codec::JsonValueSeed;
pub use decode::{decode_slice, decode_spanned, decode_str, lower, Decoded, MAX_DEPTH};
pub use encode::{to_data, to_object, EncodeOptions};
pub use error::{DecodeError, EncodeError};
pub use keypath::KeyPath;
pub use nullable::Nullable;
pub use object::ObjectExt;
pub use path::{JsonPath, LazyPath, PathSegment};
pub use spanned::Spanned;
pub use value::{JsonObject, JsonValue};
