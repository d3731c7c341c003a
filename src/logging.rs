use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `GIT_CLEANER_LOG=debug`.
pub const LOG_ENV: &str = "GIT_CLEANER_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid.
const DEFAULT_FILTER: &str = "warn";

/// Installs a `fmt` subscriber writing to stderr.
///
/// Operator-facing output goes to stdout, so diagnostics stay out of its way
/// unless asked for. Does nothing if a global subscriber is already set.
pub fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if installed.is_err() {
        tracing::debug!("subscriber already installed");
    }
}
