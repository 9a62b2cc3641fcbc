use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Read by [`setup_logging`], using the usual `EnvFilter` directive syntax.
pub const LOG_ENV: &str = "JSONVALUE_LOG";

/// Logs go to stderr so that they never mix with the document printed on stdout. Quiet by
/// default; e.g. `JSONVALUE_LOG=debug` shows decode timings.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .init();
}
