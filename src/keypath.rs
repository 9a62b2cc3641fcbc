use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A dotted path through nested objects, such as `"this.is.a.keypath"`.
///
/// Splitting never drops segments: `""` is a single empty key and `"a..b"` has an empty middle
/// key. Only [`KeyPath::from_segments`] can build an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    pub fn new(path: &str) -> Self {
        KeyPath {
            segments: path.split('.').map(ToOwned::to_owned).collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeyPath {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The first segment and the path made of the rest, or `None` for an empty path.
    pub fn head_and_tail(&self) -> Option<(&str, KeyPath)> {
        let (head, tail) = self.segments.split_first()?;
        Some((head, KeyPath::from_segments(tail.iter().cloned())))
    }

    /// The segments joined back with `.`.
    pub fn path(&self) -> String {
        self.segments.join(".")
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        KeyPath::new(path)
    }
}

impl FromStr for KeyPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(KeyPath::new(s))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
