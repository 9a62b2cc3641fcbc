//! Locations inside a JSON document.
//!
//! [`JsonPath`] is the owned form carried by errors. [`LazyPath`] is a borrowed linked list of
//! segments built on the stack while descending into a document; it is only materialized into a
//! [`JsonPath`] when something goes wrong.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// The location of a value inside a JSON document, starting from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    pub fn root() -> Self {
        JsonPath::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn push_key(&mut self, key: &str) {
        self.segments.push(PathSegment::Key(key.to_owned()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    #[must_use]
    pub fn child_key(&self, key: &str) -> Self {
        let mut child = self.clone();
        child.push_key(key);
        child
    }

    #[must_use]
    pub fn child_index(&self, index: usize) -> Self {
        let mut child = self.clone();
        child.push_index(index);
        child
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Key(key) if is_identifier(key) => write!(f, ".{key}")?,
                PathSegment::Key(key) => {
                    let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
                    write!(f, "[{quoted}]")?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum LazySegment<'a> {
    Key(&'a str),
    Index(usize),
}

/// A path under construction. Each level lives on the caller's stack and points at its parent.
#[derive(Debug, Clone, Copy)]
pub struct LazyPath<'a> {
    segment: Option<LazySegment<'a>>,
    parent: Option<&'a LazyPath<'a>>,
}

impl<'a> LazyPath<'a> {
    pub const fn root() -> Self {
        LazyPath {
            segment: None,
            parent: None,
        }
    }

    pub fn push_key<'s>(&'s self, key: &'s str) -> LazyPath<'s> {
        LazyPath {
            segment: Some(LazySegment::Key(key)),
            parent: Some(self),
        }
    }

    pub fn push_index<'s>(&'s self, index: usize) -> LazyPath<'s> {
        LazyPath {
            segment: Some(LazySegment::Index(index)),
            parent: Some(self),
        }
    }
}

impl From<&LazyPath<'_>> for JsonPath {
    fn from(lazy: &LazyPath<'_>) -> Self {
        let mut segments = Vec::new();
        let mut current = Some(lazy);
        while let Some(node) = current {
            match node.segment {
                Some(LazySegment::Key(key)) => segments.push(PathSegment::Key(key.to_owned())),
                Some(LazySegment::Index(index)) => segments.push(PathSegment::Index(index)),
                None => {}
            }
            current = node.parent;
        }
        segments.reverse();
        JsonPath { segments }
    }
}

impl fmt::Display for LazyPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        JsonPath::from(self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_as_dollar() {
        assert_eq!(JsonPath::root().to_string(), "$");
        assert!(JsonPath::root().is_root());
    }

    #[test]
    fn keys_and_indices() {
        let path = JsonPath::root().child_key("a").child_index(0).child_key("b c");
        assert_eq!(path.to_string(), r#"$.a[0]["b c"]"#);
        assert_eq!(path.segments().len(), 3);
    }

    #[test]
    fn non_identifier_keys_are_quoted() {
        assert_eq!(JsonPath::root().child_key("1st").to_string(), r#"$["1st"]"#);
        assert_eq!(JsonPath::root().child_key("").to_string(), r#"$[""]"#);
        assert_eq!(
            JsonPath::root().child_key("say \"hi\"").to_string(),
            r#"$["say \"hi\""]"#
        );
    }

    #[test]
    fn push_and_pop() {
        let mut path = JsonPath::root();
        path.push_key("outer");
        path.push_index(3);
        assert_eq!(path.pop(), Some(PathSegment::Index(3)));
        assert_eq!(path.to_string(), "$.outer");
    }

    #[test]
    fn lazy_path_materializes_in_order() {
        let root = LazyPath::root();
        let a = root.push_key("a");
        let idx = a.push_index(2);
        let b = idx.push_key("b");
        assert_eq!(JsonPath::from(&b).to_string(), "$.a[2].b");
        assert_eq!(b.to_string(), "$.a[2].b");
        assert_eq!(root.to_string(), "$");
    }
}
