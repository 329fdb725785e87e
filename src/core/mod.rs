//! Core types for the chanweld library.
//!
//! This module contains the error and terminal-state types shared by every
//! combinator, plus the cancellable channel waits they are written against.

pub mod error;
pub mod exit;

// Re-export core items
pub use error::{Error, Result};
pub use exit::Exit;
pub(crate) use exit::{forward, recv, send, Halt};
