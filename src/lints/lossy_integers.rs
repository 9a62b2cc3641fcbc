use ariadne::{Color, Fmt, Label, Report, ReportKind};
use jsonvalue::parser::Json;
use jsonvalue::{JsonPath, Spanned};
use tracing::*;

use crate::config::Config;
use crate::lints::{walk, Diagnostics};

/// An integer literal outside the `i64` range cannot be an `Int`, so it decodes as a `Double`
/// and may lose precision on the way.
pub fn lint_lossy_integers<'d>(
    config: &Config,
    tree: &Spanned<Json>,
    path: &'d String,
    diag: &mut Diagnostics<'d>,
) {
    if !config.lint_lossy_integers {
        return;
    }

    walk(tree, &mut JsonPath::root(), &mut |node, json_path| {
        let Json::Num(text) = &node.val else {
            return;
        };
        if text.contains(&['.', 'e', 'E'][..]) || text.parse::<i64>().is_ok() {
            return;
        }

        let approx: f64 = text.parse().unwrap_or(f64::NAN);
        debug!(number = %text, at = %json_path, "integer outside i64 range");
        diag.push_warning(
            Report::build(ReportKind::Warning, path, node.span.start)
                .with_message(format!(
                    "integer at {} does not fit in 64 bits",
                    json_path.fg(Color::Blue)
                ))
                .with_label(
                    Label::new((path, node.range()))
                        .with_message(format!("decoded as the double {approx:e}"))
                        .with_color(Color::Yellow),
                )
                .with_note("write it as a string if every digit matters")
                .finish(),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lints::test_support::{config, tree};

    #[test]
    fn flags_integers_outside_i64() {
        let path = "doc.json".to_owned();
        let tree = tree(r#"{"ok": 9223372036854775807, "big": 9223372036854775808, "neg": -9223372036854775809}"#);
        let mut diag = Diagnostics::default();
        lint_lossy_integers(&config(), &tree, &path, &mut diag);
        assert_eq!(diag.reports.len(), 2);
        assert_eq!(diag.errors, 0);
    }

    #[test]
    fn doubles_are_not_flagged() {
        let path = "doc.json".to_owned();
        let tree = tree("[1.5, 1e30, 18446744073709551615.0]");
        let mut diag = Diagnostics::default();
        lint_lossy_integers(&config(), &tree, &path, &mut diag);
        assert!(diag.reports.is_empty());
    }

    #[test]
    fn can_be_disabled() {
        let path = "doc.json".to_owned();
        let tree = tree("[99999999999999999999]");
        let mut config = config();
        config.lint_lossy_integers = false;
        let mut diag = Diagnostics::default();
        lint_lossy_integers(&config, &tree, &path, &mut diag);
        assert!(diag.reports.is_empty());
    }
}
