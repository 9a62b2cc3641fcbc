use std::collections::hash_map::Entry;
use std::collections::HashMap;

use ariadne::{Color, Fmt, Label, Report, ReportKind};
use jsonvalue::parser::Json;
use jsonvalue::{JsonPath, Spanned};
use tracing::*;

use crate::config::Config;
use crate::lints::{walk, Diagnostics};

/// Repeated keys in one object are legal JSON, but only the last value survives decoding, which
/// silently discards the earlier ones.
pub fn lint_duplicate_keys<'d>(
    config: &Config,
    tree: &Spanned<Json>,
    path: &'d String,
    diag: &mut Diagnostics<'d>,
) {
    let (kind, color) = if config.deny_duplicate_keys {
        (ReportKind::Error, Color::Red)
    } else {
        (ReportKind::Warning, Color::Yellow)
    };

    walk(tree, &mut JsonPath::root(), &mut |node, json_path| {
        let Json::Object(members) = &node.val else {
            return;
        };

        let mut first_seen: HashMap<&str, &Spanned<String>> = HashMap::new();
        for (key, _) in members {
            let first = match first_seen.entry(key.val.as_str()) {
                Entry::Vacant(entry) => {
                    entry.insert(key);
                    continue;
                }
                Entry::Occupied(entry) => *entry.get(),
            };

            debug!(key = %key.val, object = %json_path, "duplicate key");
            let report = Report::build(kind, path, key.span.start)
                .with_message(format!(
                    "duplicate key {} in the object at {}",
                    format!("\"{}\"", key.val).fg(Color::Blue),
                    json_path.fg(Color::Blue)
                ))
                .with_label(
                    Label::new((path, first.range()))
                        .with_message("first defined here")
                        .with_color(Color::Blue),
                )
                .with_label(
                    Label::new((path, key.range()))
                        .with_message("redefined here; this value is the one kept")
                        .with_color(color),
                )
                .finish();

            if config.deny_duplicate_keys {
                diag.push_error(report);
            } else {
                diag.push_warning(report);
            }
        }
    });
}
