//! Logging macros.
//!
//! sift logs through `tracing` under the `"sift"` target. Every event carries
//! an `event` field with a snake_case name. The crate never installs a
//! subscriber; applications configure one themselves.

/// Target for all sift log events.
pub(crate) const SIFT_TARGET: &str = "sift";

macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::SIFT_TARGET, $($field)*)
    };
}

macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::SIFT_TARGET, $($field)*)
    };
}

/// Per-record events. Keep these cheap: they sit on the evaluation path.
macro_rules! log_trace {
    ($($field:tt)*) => {
        ::tracing::trace!(target: $crate::observability::SIFT_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_trace;
pub(crate) use log_warn;
