//! Diagnostic logging to stderr.

use tracing_subscriber::EnvFilter;

// sqlx reports slow statements at warn.
const DEFAULT_FILTER: &str = "warn,sqlx=error";
const VERBOSE_FILTER: &str = "warn,schemalint_cli=debug,schemalint_core=debug";

/// Install the global subscriber. `RUST_LOG` wins over `verbose` when set.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init();
}

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::new(if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    })
}
