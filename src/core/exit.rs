//! Terminal states of a combinator call and the cancellable channel waits
//! every combinator is built on.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::error::Error;

/// How a forwarding combinator finished.
///
/// Every call starts running and ends in exactly one of these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Exit {
    /// The input was exhausted, or the combinator reached its own bound
    Completed,
    /// The cancellation token fired
    Cancelled,
    /// An output channel's receiver was dropped
    Disconnected,
}

impl Exit {
    pub fn is_completed(&self) -> bool {
        matches!(self, Exit::Completed)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Exit::Cancelled)
    }

    pub fn is_disconnected(&self) -> bool {
        matches!(self, Exit::Disconnected)
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Exit::Completed => "completed",
            Exit::Cancelled => "cancelled",
            Exit::Disconnected => "disconnected",
        }
    }
}

impl std::fmt::Display for Exit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a loop stopped before its input ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Halt {
    Cancelled,
    Disconnected,
}

impl From<Halt> for Exit {
    fn from(halt: Halt) -> Self {
        match halt {
            Halt::Cancelled => Exit::Cancelled,
            Halt::Disconnected => Exit::Disconnected,
        }
    }
}

impl From<Halt> for Error {
    fn from(halt: Halt) -> Self {
        match halt {
            Halt::Cancelled => Error::Cancelled,
            Halt::Disconnected => Error::ChannelClosed,
        }
    }
}

impl From<std::result::Result<(), Halt>> for Exit {
    fn from(flow: std::result::Result<(), Halt>) -> Self {
        match flow {
            Ok(()) => Exit::Completed,
            Err(halt) => halt.into(),
        }
    }
}

/// Receive the next value, racing the token.
///
/// `Ok(None)` means the channel is closed and drained. A token that has
/// already fired wins over a value that is ready.
pub(crate) async fn recv<T>(
    ctx: &CancellationToken,
    input: &mut mpsc::Receiver<T>,
) -> std::result::Result<Option<T>, Halt> {
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(Halt::Cancelled),
        item = input.recv() => Ok(item),
    }
}

/// Send a value, waiting for capacity while racing the token.
pub(crate) async fn send<T>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    item: T,
) -> std::result::Result<(), Halt> {
    tokio::select! {
        biased;
        _ = ctx.cancelled() => Err(Halt::Cancelled),
        sent = out.send(item) => sent.map_err(|_| Halt::Disconnected),
    }
}

/// Forward every remaining value from `input` to `out`.
pub(crate) async fn forward<T>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    input: &mut mpsc::Receiver<T>,
) -> std::result::Result<(), Halt> {
    while let Some(item) = recv(ctx, input).await? {
        send(ctx, out, item).await?;
    }
    Ok(())
}
