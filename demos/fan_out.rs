//! Fan-out and fan-in across tasks, with cancellation
//!
//! Run with: cargo run --example fan_out

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::sleep;

use chanweld::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let ctx = CancellationToken::new();

    let (src_tx, mut src_rx) = mpsc::channel(4);
    let (a_tx, mut a_rx) = mpsc::channel(4);
    let (b_tx, mut b_rx) = mpsc::channel(4);
    let (merged_tx, mut merged_rx) = mpsc::channel(4);
    let (left_tx, left_rx) = mpsc::channel(4);
    let (right_tx, right_rx) = mpsc::channel(4);

    // An endless source; only cancellation stops it.
    let source = tokio::spawn({
        let ctx = ctx.clone();
        async move { from_iter(&ctx, &src_tx, 0u32..).await }
    });

    // Two workers, fed round-robin.
    let splitter = tokio::spawn({
        let ctx = ctx.clone();
        async move { split(&ctx, &mut src_rx, &[a_tx, b_tx]).await }
    });
    let left = tokio::spawn({
        let ctx = ctx.clone();
        async move {
            map(&ctx, &left_tx, &mut a_rx, |x| Ok::<_, std::io::Error>(format!("left:{x}"))).await
        }
    });
    let right = tokio::spawn({
        let ctx = ctx.clone();
        async move {
            map(&ctx, &right_tx, &mut b_rx, |x| Ok::<_, std::io::Error>(format!("right:{x}"))).await
        }
    });

    let merger = tokio::spawn({
        let ctx = ctx.clone();
        async move { merge(&ctx, &merged_tx, &mut [left_rx, right_rx]).await }
    });

    for _ in 0..10 {
        if let Some(item) = merged_rx.recv().await {
            println!("{item}");
        }
    }

    sleep(Duration::from_millis(10)).await;
    ctx.cancel();

    println!("source:   {}", source.await.expect("source task"));
    println!("splitter: {}", splitter.await.expect("split task")?);
    println!("left:     {:?}", left.await.expect("left task"));
    println!("right:    {:?}", right.await.expect("right task"));
    println!("merge:    {}", merger.await.expect("merge task"));
    Ok(())
}
