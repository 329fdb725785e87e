//! Feeding values into a caller-owned channel.
//!
//! Sources send into a channel they borrow and leave it open; the caller
//! closes it by dropping its senders.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::{send, Exit, Halt};
use crate::observe;

/// Send every item of `items` to `out`.
pub async fn from_iter<I>(
    ctx: &CancellationToken,
    out: &mpsc::Sender<I::Item>,
    items: I,
) -> Exit
where
    I: IntoIterator,
{
    let flow = async {
        for item in items {
            send(ctx, out, item).await?;
        }
        Ok::<_, Halt>(())
    };
    observe::exit("from_iter", flow.await.into())
}

/// Send the values produced by `f` until it returns `None`.
pub async fn generate<T, F>(ctx: &CancellationToken, out: &mpsc::Sender<T>, mut f: F) -> Exit
where
    F: FnMut() -> Option<T>,
{
    let flow = async {
        while let Some(item) = f() {
            send(ctx, out, item).await?;
        }
        Ok::<_, Halt>(())
    };
    observe::exit("generate", flow.await.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::drain_now;

    #[tokio::test]
    async fn test_from_iter_sends_in_order() {
        let ctx = CancellationToken::new();
        let (tx, mut rx) = mpsc::channel(8);

        assert_eq!(from_iter(&ctx, &tx, 1..=4).await, Exit::Completed);
        assert_eq!(drain_now(&mut rx), vec![1, 2, 3, 4]);
        // Still open: the caller owns the sender.
        assert!(!tx.is_closed());
    }

    #[tokio::test]
    async fn test_from_iter_blocked_then_cancelled() {
        let ctx = CancellationToken::new();
        let (tx, mut rx) = mpsc::channel(2);

        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            canceller.cancel();
        });

        assert_eq!(from_iter(&ctx, &tx, 0..).await, Exit::Cancelled);
        assert_eq!(drain_now(&mut rx), vec![0, 1]);
    }

    #[tokio::test]
    async fn test_generate_until_none() {
        let ctx = CancellationToken::new();
        let (tx, mut rx) = mpsc::channel(8);
        let mut n = 0;

        generate(&ctx, &tx, || {
            n += 1;
            (n <= 3).then_some(n * n)
        })
        .await;

        assert_eq!(drain_now(&mut rx), vec![1, 4, 9]);
    }
}
