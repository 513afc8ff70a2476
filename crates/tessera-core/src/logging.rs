#![forbid(unsafe_code)]

//! Logging shim shared by the tessera crates.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported and
//! callers write `tessera_core::debug!(...)` as if they were using `tracing`
//! directly. Without it the same names expand to nothing, and the `*_span!`
//! forms yield a [`NoopSpan`] so `let _guard = span.enter();` still compiles.
//! Field syntax is never parsed, so structured fields cost nothing when off.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

#[cfg(not(feature = "tracing"))]
mod disabled {
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! error {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! trace_span {
        ($($arg:tt)*) => { $crate::logging::NoopSpan };
    }

    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => { $crate::logging::NoopSpan };
    }

    #[macro_export]
    macro_rules! info_span {
        ($($arg:tt)*) => { $crate::logging::NoopSpan };
    }

    #[macro_export]
    macro_rules! warn_span {
        ($($arg:tt)*) => { $crate::logging::NoopSpan };
    }

    #[macro_export]
    macro_rules! error_span {
        ($($arg:tt)*) => { $crate::logging::NoopSpan };
    }
}

/// Stand-in for `tracing::Span` when logging is compiled out.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }

    #[inline]
    pub fn entered(self) -> NoopGuard {
        NoopGuard
    }
}

/// Returned by [`NoopSpan::enter`]; dropping it does nothing.
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;

/// Install a global JSON subscriber filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
