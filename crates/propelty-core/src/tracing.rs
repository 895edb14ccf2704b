use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Build the env filter: `RUST_LOG` if valid, otherwise `default`.
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Initialize structured stdout tracing. Call once at service startup.
///
/// JSON lines in production; human-readable output when `debug` is set.
/// Subsequent calls are silently ignored.
pub fn init_tracing(debug: bool) {
    let registry = tracing_subscriber::registry().with(env_filter(DEFAULT_FILTER));
    let _ = if debug {
        registry.with(fmt::layer().pretty()).try_init()
    } else {
        registry.with(fmt::layer().json()).try_init()
    };
}
