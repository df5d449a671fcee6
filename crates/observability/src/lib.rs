//! Tracing and logging (shared setup).

/// Initialize process-wide logging from explicit settings.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init_with(settings: &LogSettings) {
    tracing::init(settings);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::{LogFormat, LogSettings};
