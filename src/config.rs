use std::path::Path;

use anyhow::{bail, Context};
use confique::Config as DeriveConfig;
use tracing::*;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "jsonvalue.toml";

#[derive(Debug, DeriveConfig)]
pub struct Config {
    /// Print the re-encoded document indented. `--compact` overrides this.
    #[config(default = true)]
    pub pretty: bool,

    /// Spaces per nesting level when pretty-printing.
    #[config(default = 2)]
    pub indent: usize,

    /// Sort object keys when re-encoding instead of keeping the input order.
    #[config(default = false)]
    pub sort_keys: bool,

    /// Treat repeated object keys as errors instead of warnings. Decoding keeps the last value
    /// either way.
    #[config(default = false)]
    pub deny_duplicate_keys: bool,

    /// Warn about integers that do not fit in 64 bits and are therefore decoded as doubles.
    #[config(default = true)]
    pub lint_lossy_integers: bool,
}

pub fn load(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let mut builder = Config::builder();
    match explicit {
        Some(path) => {
            if !path.is_file() {
                error!(path = ?path, "config file not found");
                bail!("config file `{}` does not exist", path.display());
            }
            builder = builder.file(path);
        }
        // Missing files are skipped by the builder, so the default file is optional.
        None => builder = builder.file(DEFAULT_CONFIG_FILE),
    }

    builder.load().context("failed to load configuration")
}
