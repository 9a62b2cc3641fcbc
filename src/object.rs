//! Helpers over [`JsonObject`].

use crate::keypath::KeyPath;
use crate::value::{JsonObject, JsonValue};

pub trait ObjectExt {
    /// Follows `key_path` through nested objects.
    ///
    /// An empty path finds nothing. Every segment but the last must name an object.
    fn get_key_path(&self, key_path: &KeyPath) -> Option<&JsonValue>;

    /// A copy of `self` with every entry of `other` inserted over it.
    #[must_use]
    fn union(&self, other: &JsonObject) -> JsonObject;

    /// [`ObjectExt::union`] folded over `others`, left to right.
    #[must_use]
    fn union_all(&self, others: &[JsonObject]) -> JsonObject;

    /// Renders `key=value` pairs joined by `&`, in map order. Strings are written as-is, every
    /// other value as compact JSON. Nothing is percent-encoded.
    fn to_query_string(&self) -> String;
}

impl ObjectExt for JsonObject {
    fn get_key_path(&self, key_path: &KeyPath) -> Option<&JsonValue> {
        let (last, parents) = key_path.segments().split_last()?;
        let mut object = self;
        for segment in parents {
            object = object.get(segment)?.as_object()?;
        }
        object.get(last)
    }

    fn union(&self, other: &JsonObject) -> JsonObject {
        let mut result = self.clone();
        for (key, value) in other {
            result.insert(key.clone(), value.clone());
        }
        result
    }

    fn union_all(&self, others: &[JsonObject]) -> JsonObject {
        others
            .iter()
            .fold(self.clone(), |merged, other| merged.union(other))
    }

    fn to_query_string(&self) -> String {
        self.iter()
            .map(|(key, value)| match value {
                JsonValue::String(text) => format!("{key}={text}"),
                other => format!("{key}={other}"),
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(value: JsonValue) -> JsonObject {
        match value {
            JsonValue::Object(object) => object,
            other => panic!("expected an object, found {}", other.kind_desc()),
        }
    }

    fn nested() -> JsonObject {
        object(JsonValue::from_iter([
            ("a", JsonValue::from_iter([("b", JsonValue::Int(1))])),
            ("leaf", JsonValue::from("x")),
        ]))
    }

    #[test]
    fn key_path_descends_objects() {
        let doc = nested();
        assert_eq!(doc.get_key_path(&"a.b".into()), Some(&JsonValue::Int(1)));
        assert_eq!(doc.get_key_path(&"leaf".into()), Some(&JsonValue::from("x")));
    }

    #[test]
    fn key_path_stops_at_non_objects() {
        let doc = nested();
        assert_eq!(doc.get_key_path(&"a.b.c".into()), None);
        assert_eq!(doc.get_key_path(&"leaf.x".into()), None);
        assert_eq!(doc.get_key_path(&"missing.b".into()), None);
    }

    #[test]
    fn empty_key_path_finds_nothing() {
        let doc = nested();
        assert_eq!(doc.get_key_path(&KeyPath::from_segments(Vec::<String>::new())), None);
    }

    #[test]
    fn union_prefers_right_hand_side() {
        let left = object(JsonValue::from_iter([("a", 1), ("b", 2)]));
        let right = object(JsonValue::from_iter([("b", 20), ("c", 30)]));
        let merged = left.union(&right);
        assert_eq!(merged.get("a"), Some(&JsonValue::Int(1)));
        assert_eq!(merged.get("b"), Some(&JsonValue::Int(20)));
        assert_eq!(merged.get("c"), Some(&JsonValue::Int(30)));
        // inputs are untouched
        assert_eq!(left.get("b"), Some(&JsonValue::Int(2)));
    }

    #[test]
    fn union_all_folds_left_to_right() {
        let base = object(JsonValue::from_iter([("a", 0)]));
        let merged = base.union_all(&[
            object(JsonValue::from_iter([("a", 1)])),
            object(JsonValue::from_iter([("a", 2), ("b", 2)])),
        ]);
        assert_eq!(merged.get("a"), Some(&JsonValue::Int(2)));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn query_string_writes_strings_raw() {
        let params = object(JsonValue::from_iter([
            ("q", JsonValue::from("rust")),
            ("page", JsonValue::Int(2)),
            ("exact", JsonValue::Bool(false)),
            ("tags", JsonValue::from_iter([JsonValue::from("a")])),
        ]));
        assert_eq!(
            params.to_query_string(),
            r#"q=rust&page=2&exact=false&tags=["a"]"#
        );
        assert_eq!(JsonObject::new().to_query_string(), "");
    }
}
