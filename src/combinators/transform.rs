//! Single-input, single-pass transforms: filter, map and reduce.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::{recv, send, Error, Exit, Halt, Result};
use crate::observe;

/// Forward the values for which `predicate` holds.
///
/// Runs until `input` is closed and drained, the token fires, or the
/// receiver behind `out` goes away.
pub async fn filter<T, P>(
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
            if predicate(&item) {
                send(ctx, out, item).await?;
            }
        }
        Ok::<_, Halt>(())
    };
    observe::exit("filter", flow.await.into())
}

/// Forward the values for which `predicate` does not hold.
pub async fn filter_out<T, P>(
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
            }
        }
        Ok::<_, Halt>(())
    };
    observe::exit("filter_out", flow.await.into())
}

/// Apply `f` to every value and forward the result.
///
/// The first error returned by `f` stops the loop and is returned as
/// [`Error::User`]; nothing more is read from `input`. Cancellation is
/// reported as [`Error::Cancelled`].
pub async fn map<T, U, E, F>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<U>,
    input: &mut mpsc::Receiver<T>,
    mut f: F,
) -> Result<()>
where
    F: FnMut(T) -> std::result::Result<U, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let run = async {
        while let Some(item) = recv(ctx, input).await? {
            let mapped = f(item).map_err(Error::user)?;
            send(ctx, out, mapped).await?;
        }
        Ok::<_, Error>(())
    };
    observe::result("map", run.await)
}

/// Fold every value into an accumulator starting from `seed`.
///
/// There is no error path: on cancellation the accumulator built so far
/// is returned.
pub async fn reduce<T, A, F>(
    ctx: &CancellationToken,
    input: &mut mpsc::Receiver<T>,
    seed: A,
    mut step: F,
) -> A
where
    F: FnMut(A, T) -> A,
{
    let mut acc = seed;
    let exit = loop {
        match recv(ctx, input).await {
            Ok(Some(item)) => acc = step(acc, item),
            Ok(None) => break Exit::Completed,
            Err(halt) => break halt.into(),
        }
    };
    observe::exit("reduce", exit);
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{channel_of, drain_now};

    #[derive(Debug, thiserror::Error)]
    #[error("cannot map {0}")]
    struct MapFailure(i32);

    #[tokio::test]
    async fn test_filter_keeps_matching_values() {
        let ctx = CancellationToken::new();
        let mut input = channel_of(1..=10).await;
        let (tx, mut rx) = mpsc::channel(16);

        let exit = filter(&ctx, &tx, &mut input, |x| x % 2 == 0).await;

        assert_eq!(exit, Exit::Completed);
        assert_eq!(drain_now(&mut rx), vec![2, 4, 6, 8, 10]);
    }

    #[tokio::test]
    async fn test_filter_out_drops_matching_values() {
        let ctx = CancellationToken::new();
        let mut input = channel_of(1..=10).await;
        let (tx, mut rx) = mpsc::channel(16);

        let exit = filter_out(&ctx, &tx, &mut input, |x| x % 2 == 0).await;

        assert_eq!(exit, Exit::Completed);
        assert_eq!(drain_now(&mut rx), vec![1, 3, 5, 7, 9]);
    }

    #[tokio::test]
    async fn test_filter_stops_when_cancelled() {
        let ctx = CancellationToken::new();
        ctx.cancel();
        let mut input = channel_of(1..=3).await;
        let (tx, mut rx) = mpsc::channel(16);

        let exit = filter(&ctx, &tx, &mut input, |_| true).await;

        assert_eq!(exit, Exit::Cancelled);
        assert!(drain_now(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_map_transforms_values() {
        let ctx = CancellationToken::new();
        let mut input = channel_of(1..=4).await;
        let (tx, mut rx) = mpsc::channel(16);

        let result = map(&ctx, &tx, &mut input, |x| Ok::<_, MapFailure>(x * 10)).await;

        tokio_test::assert_ok!(result);
        assert_eq!(drain_now(&mut rx), vec![10, 20, 30, 40]);
    }

    #[tokio::test]
    async fn test_map_stops_at_first_error() {
        let ctx = CancellationToken::new();
        let mut input = channel_of(1..=5).await;
        let (tx, mut rx) = mpsc::channel(16);

        let result = map(&ctx, &tx, &mut input, |x| {
            if x == 3 {
                Err(MapFailure(x))
            } else {
                Ok(x)
            }
        })
        .await;

        let err = tokio_test::assert_err!(result);
        assert_eq!(err.downcast_user::<MapFailure>().map(|e| e.0), Some(3));
        assert_eq!(drain_now(&mut rx), vec![1, 2]);
        // The rest of the input is left unread.
        assert_eq!(drain_now(&mut input), vec![4, 5]);
    }

    #[tokio::test]
    async fn test_map_reports_cancellation() {
        let ctx = CancellationToken::new();
        ctx.cancel();
        let mut input = channel_of(1..=2).await;
        let (tx, _rx) = mpsc::channel(16);

        let result = map(&ctx, &tx, &mut input, Ok::<i32, MapFailure>).await;

        assert!(tokio_test::assert_err!(result).is_cancelled());
    }

    #[tokio::test]
    async fn test_map_reports_dropped_output() {
        let ctx = CancellationToken::new();
        let mut input = channel_of(1..=2).await;
        let (tx, rx) = mpsc::channel(16);
        drop(rx);

        let result = map(&ctx, &tx, &mut input, Ok::<i32, MapFailure>).await;

        assert!(matches!(result, Err(Error::ChannelClosed)));
    }

    #[tokio::test]
    async fn test_reduce_sums() {
        let ctx = CancellationToken::new();
        let mut input = channel_of(1..=4).await;

        assert_eq!(reduce(&ctx, &mut input, 0, |acc, x| acc + x).await, 10);
    }

    #[tokio::test]
    async fn test_reduce_returns_partial_on_cancel() {
        let ctx = CancellationToken::new();
        let (tx, mut input) = mpsc::channel(4);
        tx.send(5).await.unwrap();
        tx.send(6).await.unwrap();

        // Keep the channel open so only cancellation can end the fold.
        let _tx = tx;

        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            canceller.cancel();
        });

        let total = reduce(&ctx, &mut input, 0, |acc, x| acc + x).await;

        assert_eq!(total, 11);
    }
}
