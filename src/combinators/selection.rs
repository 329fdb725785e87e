//! Positional and predicate-bounded selection.
//!
//! Counts are `usize`; a count of zero selects nothing, so [`take`] and
//! [`take_nth`] return without reading and [`drop_n`] forwards everything.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::{forward, recv, send, Exit, Halt, Result};
use crate::observe;

/// Discard the first `n` values and forward the rest.
pub async fn drop_n<T>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    input: &mut mpsc::Receiver<T>,
    n: usize,
) -> Exit {
    let flow = async {
        for _ in 0..n {
            if recv(ctx, input).await?.is_none() {
                return Ok(());
            }
        }
        forward(ctx, out, input).await
    };
    observe::exit("drop_n", flow.await.into())
}

/// Discard values while `predicate` holds, then forward the first value it
/// rejects and everything after it.
///
/// The predicate is not called again once it has returned `false`.
pub async fn drop_while<T, P>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    input: &mut mpsc::Receiver<T>,
    mut predicate: P,
) -> Exit
where
    P: FnMut(&T) -> bool,
{
    let flow = async {
        while let Some(item) = recv(ctx, input).await? {
            if !predicate(&item) {
                send(ctx, out, item).await?;
                return forward(ctx, out, input).await;
            }
        }
        Ok::<_, Halt>(())
    };
    observe::exit("drop_while", flow.await.into())
}

/// Forward the first `n` values, then stop.
///
/// Values after the `n`th are left in `input`.
pub async fn take<T>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    input: &mut mpsc::Receiver<T>,
    n: usize,
) -> Exit {
    let flow = async {
        for _ in 0..n {
            match recv(ctx, input).await? {
                Some(item) => send(ctx, out, item).await?,
                None => break,
            }
        }
        Ok::<_, Halt>(())
    };
    observe::exit("take", flow.await.into())
}

/// Forward the values at positions `0, n, 2n, ...`.
///
/// `n == 1` forwards every value; `n == 0` forwards nothing and reads
/// nothing.
pub async fn take_nth<T>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    input: &mut mpsc::Receiver<T>,
    n: usize,
) -> Exit {
    if n == 0 {
        return observe::exit("take_nth", Exit::Completed);
    }

    let flow = async {
        let mut position = 0usize;
        while let Some(item) = recv(ctx, input).await? {
            if position % n == 0 {
                send(ctx, out, item).await?;
            }
            position = position.wrapping_add(1);
        }
        Ok::<_, Halt>(())
    };
    observe::exit("take_nth", flow.await.into())
}

/// Forward values while `predicate` holds.
///
/// The first rejected value is consumed but not forwarded.
pub async fn take_while<T, P>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    input: &mut mpsc::Receiver<T>,
    mut predicate: P,
) -> Exit
where
    P: FnMut(&T) -> bool,
{
    let flow = async {
        while let Some(item) = recv(ctx, input).await? {
            if !predicate(&item) {
                break;
            }
            send(ctx, out, item).await?;
        }
        Ok::<_, Halt>(())
    };
    observe::exit("take_while", flow.await.into())
}

/// Return the first value satisfying `predicate`.
///
/// `Ok(None)` means `input` ran out without a match; cancellation is
/// reported as [`Error::Cancelled`](crate::Error::Cancelled).
pub async fn first<T, P>(
    ctx: &CancellationToken,
    input: &mut mpsc::Receiver<T>,
    mut predicate: P,
) -> Result<Option<T>>
where
    P: FnMut(&T) -> bool,
{
    let search = async {
        while let Some(item) = recv(ctx, input).await? {
            if predicate(&item) {
                return Ok(Some(item));
            }
        }
        Ok::<_, Halt>(None)
    };
    observe::result("first", search.await.map_err(Into::into))
}
