//! # Composable channel combinators for tokio
//!
//! This crate provides the building blocks for concurrent data pipelines on
//! top of `tokio::sync::mpsc` channels, leaving every lifecycle decision to
//! the caller.
//!
//! ## Core Concepts
//!
//! - **Channels are borrowed**: combinators read from `&mut Receiver` and
//!   write to `&Sender`, and never close either one
//! - **Cancellation is explicit**: every call takes a
//!   [`CancellationToken`](tokio_util::sync::CancellationToken) and observes it
//!   at every receive and send
//! - **No hidden tasks**: each combinator runs on the caller's task; spawning
//!   and worker counts stay with the caller
//! - **Terminal states**: forwarding combinators report an [`Exit`], the rest
//!   return a value or an [`Error`]
//!
//! ## Example
//!
//! ```rust
//! use chanweld::prelude::*;
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = CancellationToken::new();
//!     let (tx, mut numbers) = mpsc::channel(16);
//!     let (even_tx, mut evens) = mpsc::channel(16);
//!
//!     from_iter(&ctx, &tx, 1..=10).await;
//!     drop(tx);
//!
//!     filter(&ctx, &even_tx, &mut numbers, |x| x % 2 == 0).await;
//!     drop(even_tx);
//!
//!     let total = reduce(&ctx, &mut evens, 0, |acc, x| acc + x).await;
//!     assert_eq!(total, 30);
//!     Ok(())
//! }
//! ```

pub mod combinators;
pub mod core;
pub mod sinks;
pub mod sources;

mod observe;

#[cfg(test)]
mod test_support;

// Re-export commonly used items
pub mod prelude {
    pub use crate::combinators::*;
    pub use crate::core::{Error, Exit, Result};
    pub use crate::sinks::{collect, for_each};
    pub use crate::sources::{from_iter, generate};
    pub use tokio_util::sync::CancellationToken;
}

// Re-export main types
pub use crate::core::{Error, Exit, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
