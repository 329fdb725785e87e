//! Grouping values into chunks and flattening them back out.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::{recv, send, Error, Exit, Halt, Result};
use crate::observe;

/// Emit values in chunks of `size`.
///
/// A final, shorter chunk is emitted when `input` runs out with values still
/// buffered. On cancellation the partial chunk is discarded. `size == 0` is
/// rejected before anything is read.
pub async fn chunk<T>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<Vec<T>>,
    input: &mut mpsc::Receiver<T>,
    size: usize,
) -> Result<Exit> {
    if size == 0 {
        return observe::result("chunk", Err(Error::config("chunk size must be positive")));
    }

    let flow = async {
        let mut buffer = Vec::new();
        while let Some(item) = recv(ctx, input).await? {
            buffer.push(item);
            if buffer.len() == size {
                send(ctx, out, std::mem::take(&mut buffer)).await?;
            }
        }
        if !buffer.is_empty() {
            send(ctx, out, buffer).await?;
        }
        Ok::<_, Halt>(())
    };
    Ok(observe::exit("chunk", flow.await.into()))
}

/// Emit runs of consecutive values that share the same `key`.
///
/// A new chunk starts whenever a value's key differs from the key of the
/// chunk being built. The last chunk is emitted when `input` runs out.
pub async fn chunk_by<T, K, F>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<Vec<T>>,
    input: &mut mpsc::Receiver<T>,
    mut key: F,
) -> Exit
where
    K: PartialEq,
    F: FnMut(&T) -> K,
{
    let flow = async {
        let mut buffer = Vec::new();
        let mut current: Option<K> = None;
        while let Some(item) = recv(ctx, input).await? {
            let k = key(&item);
            if current.as_ref().is_some_and(|c| *c != k) {
                send(ctx, out, std::mem::take(&mut buffer)).await?;
            }
            current = Some(k);
            buffer.push(item);
        }
        if !buffer.is_empty() {
            send(ctx, out, buffer).await?;
        }
        Ok::<_, Halt>(())
    };
    observe::exit("chunk_by", flow.await.into())
}

/// Send the elements of every received collection one by one.
///
/// Order within and across collections is preserved.
pub async fn flatten<I>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<I::Item>,
    input: &mut mpsc::Receiver<I>,
) -> Exit
where
    I: IntoIterator,
{
    let flow = async {
        while let Some(batch) = recv(ctx, input).await? {
            for item in batch {
                send(ctx, out, item).await?;
            }
        }
        Ok::<_, Halt>(())
    };
    observe::exit("flatten", flow.await.into())
}
