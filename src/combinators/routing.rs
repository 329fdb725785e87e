//! Fan-in and fan-out routing.
//!
//! These are the combinators that deal with more than one channel on a side.
//! [`merge`] is the only one that reads concurrently; it does so inside the
//! calling task, so every reader has finished by the time it returns.

use futures::future::{join_all, try_join_all};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::{forward, recv, send, Error, Exit, Halt, Result};
use crate::observe;

/// Send a copy of every input value to every output.
///
/// The sends for one value run concurrently and all of them finish before
/// the next value is read, so a slow output holds back the others. If a send
/// is cancelled or hits a dropped receiver the remaining sends for that value
/// are abandoned and the call returns. With no outputs the values are
/// consumed and discarded.
pub async fn broadcast<T>(
    ctx: &CancellationToken,
    input: &mut mpsc::Receiver<T>,
    outs: &[mpsc::Sender<T>],
) -> Exit
where
    T: Clone,
{
    let flow = async {
        while let Some(item) = recv(ctx, input).await? {
            let Some((last, rest)) = outs.split_last() else {
                continue;
            };
            // The original goes to the last output; the others get clones.
            let mut copies: Vec<_> = rest.iter().map(|out| (out, item.clone())).collect();
            copies.push((last, item));
            try_join_all(copies.into_iter().map(|(out, copy)| send(ctx, out, copy))).await?;
        }
        Ok::<_, Halt>(())
    };
    observe::exit("broadcast", flow.await.into())
}

/// Distribute values round-robin: value `i` goes to `outs[i % outs.len()]`.
///
/// An empty `outs` is rejected before anything is read.
pub async fn split<T>(
    ctx: &CancellationToken,
    input: &mut mpsc::Receiver<T>,
    outs: &[mpsc::Sender<T>],
) -> Result<Exit> {
    if outs.is_empty() {
        return observe::result("split", Err(Error::config("split needs at least one output")));
    }

    let flow = async {
        for out in outs.iter().cycle() {
            match recv(ctx, input).await? {
                Some(item) => send(ctx, out, item).await?,
                None => break,
            }
        }
        Ok::<_, Halt>(())
    };
    Ok(observe::exit("split", flow.await.into()))
}

/// Route values for which `predicate` holds to `out_true`, the rest to
/// `out_false`.
pub async fn partition<T, P>(
    ctx: &CancellationToken,
    input: &mut mpsc::Receiver<T>,
    out_true: &mpsc::Sender<T>,
    out_false: &mpsc::Sender<T>,
    mut predicate: P,
) -> Exit
where
    P: FnMut(&T) -> bool,
{
    let flow = async {
        while let Some(item) = recv(ctx, input).await? {
            let out = if predicate(&item) { out_true } else { out_false };
            send(ctx, out, item).await?;
        }
        Ok::<_, Halt>(())
    };
    observe::exit("partition", flow.await.into())
}

/// Forward values from all inputs to `out` as they arrive.
///
/// One reader per input runs concurrently with the others, so a busy input
/// cannot starve a quiet one. Values from the same input keep their order;
/// there is no ordering across inputs. Returns once every input is
/// exhausted, the token fires, or `out` loses its receiver. A reader that
/// finds `out` disconnected stops its siblings.
pub async fn merge<T>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    ins: &mut [mpsc::Receiver<T>],
) -> Exit {
    let group = ctx.child_token();

    let readers = ins.iter_mut().enumerate().map(|(index, input)| {
        let group = &group;
        async move {
            observe::reader(index, "started");
            let flow = forward(group, out, input).await;
            if flow == Err(Halt::Disconnected) {
                group.cancel();
            }
            observe::reader(index, "stopped");
            flow
        }
    });
    let flows = join_all(readers).await;

    let exit = if ctx.is_cancelled() && flows.contains(&Err(Halt::Cancelled)) {
        Exit::Cancelled
    } else if flows.contains(&Err(Halt::Disconnected)) {
        Exit::Disconnected
    } else {
        Exit::Completed
    };
    observe::exit("merge", exit)
}

/// Forward every value of `ins[0]`, then every value of `ins[1]`, and so on.
pub async fn concat<T>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    ins: &mut [mpsc::Receiver<T>],
) -> Exit {
    let flow = async {
        for input in ins.iter_mut() {
            forward(ctx, out, input).await?;
        }
        Ok::<_, Halt>(())
    };
    observe::exit("concat", flow.await.into())
}

/// Receive and discard everything until `input` is exhausted.
///
/// Useful to unblock a producer whose output nobody else reads.
pub async fn drain<T>(ctx: &CancellationToken, input: &mut mpsc::Receiver<T>) -> Exit {
    let flow = async {
        while recv(ctx, input).await?.is_some() {}
        Ok::<_, Halt>(())
    };
    observe::exit("drain", flow.await.into())
}
