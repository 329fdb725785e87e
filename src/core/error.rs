//! Error types for the combinator library.

use std::sync::Arc;

/// The main error type for combinators that have an error-returning contract.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A user-supplied function failed
    #[error("user function failed: {0}")]
    User(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// The cancellation token fired before the combinator finished
    #[error("operation was cancelled")]
    Cancelled,

    /// The receiving half of an output channel was dropped
    #[error("output channel was closed")]
    ChannelClosed,

    /// A scalar parameter was rejected before any input was read
    #[error("invalid configuration: {0}")]
    Config(String),
}

// Convenience constructors
impl Error {
    /// Wrap an error returned by a user-supplied function
    pub fn user<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::User(Arc::new(error))
    }

    /// Create a configuration error with a message
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Whether this error reports cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }

    /// Borrow the original user error if it has type `E`.
    ///
    /// User errors are stored as returned, so callers can recover the exact
    /// value their function produced.
    pub fn downcast_user<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Error::User(e) => e.downcast_ref::<E>(),
            _ => None,
        }
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for Error {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        Error::ChannelClosed
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, Error>;
