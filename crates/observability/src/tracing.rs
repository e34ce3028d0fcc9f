//! Tracing subscriber installation.
//!
//! Logs are JSON lines with timestamps. `RUST_LOG` overrides the default
//! filter, e.g. `RUST_LOG=rolodex_infra=debug,info`.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";

/// Resolve the filter: `RUST_LOG` when set and parseable, else `default`.
pub fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global JSON subscriber.
///
/// Returns `false` if a global subscriber was already installed.
pub fn init(default: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter(default))
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init()
        .is_ok()
}
