//! Helpers shared by the unit tests.

use tokio::sync::mpsc;

/// A closed channel that still holds `items`.
pub(crate) async fn channel_of<I>(items: I) -> mpsc::Receiver<I::Item>
where
    I: IntoIterator,
{
    let items: Vec<_> = items.into_iter().collect();
    let (tx, rx) = mpsc::channel(items.len().max(1));
    for item in items {
        tx.send(item).await.expect("receiver is alive");
    }
    rx
}

/// Everything currently buffered in `rx`, without waiting.
pub(crate) fn drain_now<T>(rx: &mut mpsc::Receiver<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Ok(item) = rx.try_recv() {
        items.push(item);
    }
    items
}

/// Fire `ctx` from another task once the current one yields.
pub(crate) fn cancel_soon(ctx: &tokio_util::sync::CancellationToken) {
    let ctx = ctx.clone();
    tokio::spawn(async move {
        tokio::task::yield_now().await;
        ctx.cancel();
    });
}
