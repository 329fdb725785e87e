//! Basic usage examples for chanweld
//!
//! Run with: cargo run --example basic

use tokio::sync::mpsc;

use chanweld::prelude::*;

#[derive(Debug, thiserror::Error)]
#[error("{0} is not a number")]
struct NotANumber(String);

/// Example 1: Transform and filter
async fn transform_filter_example(ctx: &CancellationToken) -> Result<()> {
    println!("=== Transform and Filter ===");

    let (tx, mut numbers) = mpsc::channel(32);
    let (sq_tx, mut squares) = mpsc::channel(32);
    let (keep_tx, mut kept) = mpsc::channel(32);

    from_iter(ctx, &tx, 1..21).await;
    drop(tx);

    filter(ctx, &sq_tx, &mut numbers, |x| x % 3 == 0).await;
    drop(sq_tx);

    map(ctx, &keep_tx, &mut squares, |x: i64| Ok::<_, NotANumber>(x * x)).await?;
    drop(keep_tx);

    println!("Squares: {:?}", collect(ctx, &mut kept).await);
    println!();
    Ok(())
}

/// Example 2: A failing mapper stops the stage
async fn parse_example(ctx: &CancellationToken) -> Result<()> {
    println!("=== Parsing with Errors ===");

    let (tx, mut words) = mpsc::channel(8);
    let (out_tx, mut parsed) = mpsc::channel(8);

    from_iter(ctx, &tx, ["1", "2", "three", "4"].map(String::from)).await;
    drop(tx);

    let result = map(ctx, &out_tx, &mut words, |w| {
        w.parse::<i32>().map_err(|_| NotANumber(w))
    })
    .await;
    drop(out_tx);

    println!("Parsed before failure: {:?}", collect(ctx, &mut parsed).await);
    match result {
        Err(e) => println!("Stopped: {}", e),
        Ok(()) => println!("All parsed"),
    }
    println!("Left unread: {:?}", collect(ctx, &mut words).await);
    println!();
    Ok(())
}

/// Example 3: Batching and deduplication
async fn batching_example(ctx: &CancellationToken) -> Result<()> {
    println!("=== Batching ===");

    let (tx, mut readings) = mpsc::channel(32);
    let (uniq_tx, mut unique) = mpsc::channel(32);
    let (batch_tx, mut batches) = mpsc::channel(32);

    from_iter(ctx, &tx, [3, 3, 4, 4, 4, 5, 3, 3, 6, 7]).await;
    drop(tx);

    compact(ctx, &uniq_tx, &mut readings).await;
    drop(uniq_tx);

    chunk(ctx, &batch_tx, &mut unique, 2).await?;
    drop(batch_tx);

    while let Some(batch) = batches.recv().await {
        println!("Batch: {:?}", batch);
    }
    println!();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let ctx = CancellationToken::new();

    transform_filter_example(&ctx).await?;
    parse_example(&ctx).await?;
    batching_example(&ctx).await?;

    println!("All examples completed successfully!");
    Ok(())
}
