//! Process-wide logging setup shared by the rolodex binaries.

/// Initialize tracing/logging with the `info` default level.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER);
}

/// Tracing subscriber configuration (filters, JSON formatting).
pub mod tracing;
