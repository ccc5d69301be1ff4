//! Diagnostic tracing for stepdoc.
//!
//! Events go to stderr so rendered documents on stdout stay clean.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn` if unset, or `stepdoc=debug` when
/// `verbose` is set. A second call keeps the first subscriber.
///
/// # Example
/// ```bash
/// RUST_LOG=stepdoc=trace stepdoc render notes.txt
/// ```
pub fn init(verbose: bool) {
    let fallback = if verbose { "stepdoc=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init()
    {
        tracing::debug!(%err, "tracing subscriber already installed");
    }
}
