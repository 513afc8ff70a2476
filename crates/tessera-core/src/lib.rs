#![forbid(unsafe_code)]

//! Core: signed cell geometry, grapheme width, and the logging shim.

pub mod geometry;
pub mod logging;
pub mod text;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

pub use geometry::{Direction, Point, Rect, Sides};
