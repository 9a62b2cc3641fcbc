use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use clap::Parser as ClapParser;
use jsonvalue::perf::{CorePerformance, TracingPerformance};
use jsonvalue::{decode_spanned, Decoded, EncodeOptions};
use tracing::*;

use crate::config::Config;
use crate::lints::Diagnostics;

mod config;
mod lints;
mod logging;

#[derive(Debug, ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to a JSON document.
    input: PathBuf,

    /// A TOML configuration file. Defaults to `jsonvalue.toml` in the working directory, if
    /// present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only decode and lint the document; do not print it.
    #[arg(long)]
    check: bool,

    /// Print the document on a single line.
    #[arg(long)]
    compact: bool,

    /// Sort object keys in the printed document.
    #[arg(long)]
    sort_keys: bool,
}

impl Args {
    fn encode_options(&self, config: &Config) -> EncodeOptions {
        EncodeOptions {
            pretty: config.pretty && !self.compact,
            indent: config.indent,
            sort_keys: config.sort_keys || self.sort_keys,
        }
    }
}

fn main() -> anyhow::Result<()> {
    logging::setup_logging();

    let cli = Args::parse();

    debug!(input = ?cli.input);

    let config = config::load(cli.config.as_deref())?;
    debug!(?config);

    let performance = CorePerformance::shared();
    performance.register_tracker(TracingPerformance);

    let json_string = match std::fs::read_to_string(&cli.input) {
        Ok(file) => file,
        Err(e) => {
            error!(path = ?cli.input, "failed to read input");
            return Err(e)
                .with_context(|| format!("failed to read file `{}`", cli.input.display()));
        }
    };

    let path = cli.input.display().to_string();

    let tracker = performance.start("decode");
    let Decoded {
        tree,
        value,
        errors,
    } = decode_spanned(&json_string);
    if let Some(tracker) = tracker {
        tracker.stop();
    }

    for e in &errors {
        let span = e.span().unwrap_or(0..0);
        Report::build(ReportKind::Error, &path, span.start)
            .with_message(format!("type mismatch at {}", e.path().fg(Color::Blue)))
            .with_label(
                Label::new((&path, span))
                    .with_message(e.reason())
                    .with_color(Color::Red),
            )
            .finish()
            .print((&path, Source::from(&json_string)))?;
    }

    let (Some(tree), Some(value)) = (tree, value) else {
        bail!("failed to decode JSON document `{path}`");
    };

    let mut diagnostics = Diagnostics::default();
    lints::lint_duplicate_keys(&config, &tree, &path, &mut diagnostics);
    lints::lint_lossy_integers(&config, &tree, &path, &mut diagnostics);

    let error_count = diagnostics.errors;
    for diagnostic in diagnostics.reports {
        diagnostic.print((&path, Source::from(&json_string)))?;
    }
    if error_count > 0 {
        bail!("`{path}` has {error_count} lint error(s)");
    }

    if cli.check {
        return Ok(());
    }

    let tracker = performance.start("encode");
    let encoded = value.encode_with(&cli.encode_options(&config));
    if let Some(tracker) = tracker {
        tracker.stop();
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{encoded}").context("failed to write the document to stdout")?;

    Ok(())
}
