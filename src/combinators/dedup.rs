//! Duplicate suppression.
//!
//! The `compact` family compares each value only with the last one emitted.
//! The `distinct` family remembers every key seen during the call; that set
//! grows with the number of distinct keys and is not bounded.

use std::collections::HashSet;
use std::hash::Hash;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::{recv, send, Exit, Halt};
use crate::observe;

/// Suppress values equal to the one emitted just before them.
pub async fn compact<T>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    input: &mut mpsc::Receiver<T>,
) -> Exit
where
    T: PartialEq + Clone,
{
    let flow = compact_with(ctx, out, input, |a, b| a == b).await;
    observe::exit("compact", flow.into())
}

/// Suppress values that `equal` considers the same as the last emitted one.
///
/// `equal` is called as `equal(&last_emitted, &candidate)`. The first value
/// is always emitted.
pub async fn compact_by<T, F>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    input: &mut mpsc::Receiver<T>,
    equal: F,
) -> Exit
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    let flow = compact_with(ctx, out, input, equal).await;
    observe::exit("compact_by", flow.into())
}

/// Suppress values already seen anywhere earlier in the input.
pub async fn distinct<T>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    input: &mut mpsc::Receiver<T>,
) -> Exit
where
    T: Eq + Hash + Clone,
{
    let flow = distinct_with(ctx, out, input, T::clone).await;
    observe::exit("distinct", flow.into())
}

/// Suppress values whose `key` was already seen earlier in the input.
pub async fn distinct_by<T, K, F>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    input: &mut mpsc::Receiver<T>,
    key: F,
) -> Exit
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let flow = distinct_with(ctx, out, input, key).await;
    observe::exit("distinct_by", flow.into())
}

async fn compact_with<T, F>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    input: &mut mpsc::Receiver<T>,
    mut equal: F,
) -> Result<(), Halt>
where
    T: Clone,
    F: FnMut(&T, &T) -> bool,
{
    let mut last: Option<T> = None;
    while let Some(item) = recv(ctx, input).await? {
        if let Some(prev) = &last {
            if equal(prev, &item) {
                continue;
            }
        }
        last = Some(item.clone());
        send(ctx, out, item).await?;
    }
    Ok(())
}

async fn distinct_with<T, K, F>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<T>,
    input: &mut mpsc::Receiver<T>,
    mut key: F,
) -> Result<(), Halt>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    while let Some(item) = recv(ctx, input).await? {
        if seen.insert(key(&item)) {
            send(ctx, out, item).await?;
        }
    }
    Ok(())
}
