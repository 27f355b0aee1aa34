use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Variables consulted for a filter directive, in order.
const LOG_ENV_VARS: [&str; 2] = ["VOLLEY_LOG", "RUST_LOG"];

/// Installs the global subscriber. The filter comes from `VOLLEY_LOG`, then
/// `RUST_LOG`, falling back to `debug` when verbose and `info` otherwise.
pub fn init_logging(verbose: bool, no_color: bool) {
    let configured = LOG_ENV_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok());

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(resolve_filter(configured, verbose))
        .with_ansi(!no_color)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

// An unparsable directive falls back as if none was given.
fn resolve_filter(configured: Option<String>, verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    configured
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}
