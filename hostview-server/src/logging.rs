use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Service logs at info; per-request spans from the trace layer only show up
/// when asked for.
pub const DEFAULT_DIRECTIVES: &str = "info,tower_http=warn";

/// Builds the filter from a `RUST_LOG`-style string, falling back to
/// [`DEFAULT_DIRECTIVES`] when it is unset or does not parse.
pub fn env_filter(raw: Option<&str>) -> EnvFilter {
    raw.filter(|r| !r.trim().is_empty())
        .and_then(|r| EnvFilter::try_new(r).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs the stdout subscriber for `service` and logs the effective filter.
pub fn init_tracing(service: &str) {
    let raw = std::env::var("RUST_LOG").ok();
    let filter = env_filter(raw.as_deref());
    let directives = filter.to_string();

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(false)
        .with_target(false);

    // keeps the first subscriber when called twice
    if tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        info!(service, filter = %directives, "logging initialised");
    }
}
