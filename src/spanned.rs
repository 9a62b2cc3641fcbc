use std::ops::Range;

use chumsky::span::SimpleSpan;

/// A value together with the byte range of the source text it was parsed from. Comparisons only
/// look at the value.
#[derive(Debug, Clone)]
pub struct Spanned<T> {
    pub span: SimpleSpan<usize>,
    pub val: T,
}

impl<T> Spanned<T> {
    pub fn range(&self) -> Range<usize> {
        self.span.into_range()
    }
}

impl<T: PartialEq> PartialEq for Spanned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<T: Eq> Eq for Spanned<T> {}

impl<T: PartialOrd> PartialOrd for Spanned<T> {
    fn partial_cmp(&self, other: &Spanned<T>) -> Option<std::cmp::Ordering> {
        self.val.partial_cmp(&other.val)
    }
}

impl<T: Ord> Ord for Spanned<T> {
    fn cmp(&self, other: &Spanned<T>) -> std::cmp::Ordering {
        self.val.cmp(&other.val)
    }
}
