//! Consuming a channel on the caller's task.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::core::{recv, Error, Exit, Result};
use crate::observe;

/// Collect every value into a `Vec`.
///
/// Like [`reduce`](crate::combinators::reduce), the values gathered so far
/// are returned if the token fires.
pub async fn collect<T>(ctx: &CancellationToken, input: &mut mpsc::Receiver<T>) -> Vec<T> {
    let mut items = Vec::new();
    let exit = loop {
        match recv(ctx, input).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => break Exit::Completed,
            Err(halt) => break halt.into(),
        }
    };
    observe::exit("collect", exit);
    items
}

/// Hand every value to `f`, stopping at the first error it returns.
pub async fn for_each<T, E, F>(
    ctx: &CancellationToken,
    input: &mut mpsc::Receiver<T>,
    mut f: F,
) -> Result<()>
where
    F: FnMut(T) -> std::result::Result<(), E>,
    E: std::error::Error + Send + Sync + 'static,
{
    let run = async {
        while let Some(item) = recv(ctx, input).await? {
            f(item).map_err(Error::user)?;
        }
        Ok::<_, Error>(())
    };
    observe::result("for_each", run.await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::channel_of;

    #[derive(Debug, thiserror::Error)]
    #[error("rejected {0}")]
    struct Rejected(u8);

    #[tokio::test]
    async fn test_collect_everything() {
        let ctx = CancellationToken::new();
        let mut input = channel_of(vec!["x", "y"]).await;

        assert_eq!(collect(&ctx, &mut input).await, vec!["x", "y"]);
    }

    #[tokio::test]
    async fn test_collect_partial_on_cancel() {
        let ctx = CancellationToken::new();
        let (tx, mut input) = mpsc::channel(4);
        tx.send(1).await.unwrap();

        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            canceller.cancel();
        });

        assert_eq!(collect(&ctx, &mut input).await, vec![1]);
        drop(tx);
    }

    #[tokio::test]
    async fn test_for_each_stops_at_first_error() {
        let ctx = CancellationToken::new();
        let mut input = channel_of(vec![1u8, 2, 3]).await;
        let mut seen = Vec::new();

        let result = for_each(&ctx, &mut input, |x| {
            if x == 2 {
                return Err(Rejected(x));
            }
            seen.push(x);
            Ok(())
        })
        .await;

        let err = tokio_test::assert_err!(result);
        assert_eq!(err.downcast_user::<Rejected>().map(|e| e.0), Some(2));
        assert_eq!(seen, vec![1]);
    }
}
