//! Diagnostics shim: emits `tracing` events and `metrics` counters when the
//! corresponding features are enabled, and compiles to nothing otherwise.
//!
//! Outcomes are always returned to the caller; these hooks only mirror them.

use crate::core::{Exit, Result};

/// Record the terminal state of a forwarding combinator and hand it back.
pub(crate) fn exit(op: &'static str, exit: Exit) -> Exit {
    #[cfg(feature = "tracing")]
    tracing::debug!(op, exit = exit.as_str(), "combinator finished");

    #[cfg(feature = "metrics")]
    metrics::counter!("chanweld_exits_total", "op" => op, "exit" => exit.as_str()).increment(1);

    #[cfg(not(any(feature = "tracing", feature = "metrics")))]
    let _ = op;

    exit
}

/// Record the outcome of a combinator with an error-returning contract.
pub(crate) fn result<T>(op: &'static str, result: Result<T>) -> Result<T> {
    #[cfg(feature = "tracing")]
    {
        match &result {
            Ok(_) => tracing::debug!(op, "combinator finished"),
            Err(e) => tracing::debug!(op, error = %e, "combinator stopped"),
        }
    }

    #[cfg(feature = "metrics")]
    {
        let outcome = match &result {
            Ok(_) => "completed",
            Err(crate::core::Error::Cancelled) => "cancelled",
            Err(crate::core::Error::ChannelClosed) => "disconnected",
            Err(crate::core::Error::Config(_)) => "config",
            Err(crate::core::Error::User(_)) => "failed",
        };
        metrics::counter!("chanweld_exits_total", "op" => op, "exit" => outcome).increment(1);
    }

    #[cfg(not(any(feature = "tracing", feature = "metrics")))]
    let _ = op;

    result
}

/// Trace a merge reader starting or stopping.
pub(crate) fn reader(index: usize, event: &'static str) {
    #[cfg(feature = "tracing")]
    tracing::trace!(reader = index, event, "merge reader");

    #[cfg(not(feature = "tracing"))]
    let _ = (index, event);
}
