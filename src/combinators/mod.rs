//! Channel combinators.
//!
//! Every combinator borrows the channels it works on and never closes them:
//! read-ends are taken as `&mut Receiver`, write-ends as `&Sender`. Each call
//! runs on the caller's task and observes the cancellation token at every
//! receive and send.

pub mod batching;
pub mod dedup;
pub mod routing;
pub mod selection;
pub mod transform;

pub use batching::{chunk, chunk_by, flatten};
pub use dedup::{compact, compact_by, distinct, distinct_by};
pub use routing::{broadcast, concat, drain, merge, partition, split};
pub use selection::{drop_n, drop_while, first, take, take_nth, take_while};
pub use transform::{filter, filter_out, map, reduce};
