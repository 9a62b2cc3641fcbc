//! Checks over the syntax tree of a document that decoded successfully. They point at input
//! that is valid JSON but probably not what the author meant.

use std::ops::Range;

use ariadne::Report;
use jsonvalue::parser::Json;
use jsonvalue::{JsonPath, Spanned};

mod duplicate_keys;
mod lossy_integers;

pub(crate) use duplicate_keys::*;
pub(crate) use lossy_integers::*;

pub(crate) type DiagnosticReport<'a> = Report<'a, (&'a String, Range<usize>)>;

#[derive(Default)]
pub(crate) struct Diagnostics<'a> {
    pub(crate) reports: Vec<DiagnosticReport<'a>>,
    pub(crate) errors: usize,
}

impl<'a> Diagnostics<'a> {
    pub(crate) fn push_error(&mut self, report: DiagnosticReport<'a>) {
        self.errors += 1;
        self.reports.push(report);
    }

    pub(crate) fn push_warning(&mut self, report: DiagnosticReport<'a>) {
        self.reports.push(report);
    }
}

/// Visits `node` and everything below it, depth first, together with each node's path.
pub(crate) fn walk<'t, F>(node: &'t Spanned<Json>, path: &mut JsonPath, visit: &mut F)
where
    F: FnMut(&'t Spanned<Json>, &JsonPath),
{
    visit(node, path);
    match &node.val {
        Json::Object(members) => {
            for (key, member) in members {
                path.push_key(&key.val);
                walk(member, path, visit);
                path.pop();
            }
        }
        Json::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                path.push_index(index);
                walk(item, path, visit);
                path.pop();
            }
        }
        _ => {}
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::tree;
    use super::*;

    #[test]
    fn walk_visits_every_node_with_its_path() {
        let tree = tree(r#"{"a": [1, {"b": null}]}"#);
        let mut seen = Vec::new();
        walk(&tree, &mut JsonPath::root(), &mut |node, path| {
            seen.push(format!("{path} {}", node.val.kind_desc()));
        });
        assert_eq!(
            seen,
            [
                "$ object",
                "$.a array",
                "$.a[0] number",
                "$.a[1] object",
                "$.a[1].b null",
            ]
        );
    }
}
