//! Tracing/logging setup for hosts embedding the engine.
//!
//! The engine crates only emit `tracing` events; a host binary calls
//! [`init`] once at startup to get them onto stderr.

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filters, layers).
pub mod tracing;
