//! Diagnostic logging to stderr.
//!
//! User-facing messages go through `cli::output`; this is only for
//! tracing what the engine does.  The filter comes from `CREDVAULT_LOG`
//! (e.g. `CREDVAULT_LOG=credvault::pager=trace`), else `warn`, or `debug`
//! with `--verbose`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "CREDVAULT_LOG";

/// Install the global subscriber.  Safe to call more than once; later
/// calls are ignored.
pub fn init(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
