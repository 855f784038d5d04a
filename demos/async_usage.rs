//! Async usage examples

use slotpool::{ExhaustionPolicy, Pool, PoolConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::main]
async fn main() {
    println!("=== slotpool - Async Examples ===\n");

    // Example 1: Async acquire
    async_acquire().await;

    // Example 2: Async with timeout
    async_with_timeout().await;

    // Example 3: Concurrent access
    concurrent_access().await;
}

async fn async_acquire() {
    println!("1. Async Acquire:");
    let pool = Pool::new(vec![1, 2, 3], PoolConfig::default());

    {
        let item = pool.acquire_async().await.unwrap();
        println!("   Got item asynchronously: {}", *item);
    }

    println!();
}

async fn async_with_timeout() {
    println!("2. Async with Timeout:");

    let config = PoolConfig::new()
        .with_exhaustion_policy(ExhaustionPolicy::Reject)
        .with_acquire_timeout(Duration::from_millis(100));

    let pool = Pool::new(vec![42], config);

    // Hold the only item
    let _held = pool.acquire().unwrap();

    // The next acquire polls until the timeout elapses
    match pool.acquire_async().await {
        Ok(_) => println!("   Got item"),
        Err(e) => println!("   Error: {e}"),
    }

    println!();
}

async fn concurrent_access() {
    println!("3. Concurrent Access:");

    let config = PoolConfig::new().with_exhaustion_policy(ExhaustionPolicy::Reject);
    let pool = Arc::new(Pool::from_fn(|| 0u64, 4, config));

    let mut handles = Vec::new();
    for worker in 0..8 {
        let pool = Arc::clone(&pool);
        handles.push(tokio::spawn(async move {
            let mut item = pool.acquire_async().await.unwrap();
            *item += 1;
            sleep(Duration::from_millis(5)).await;
            println!("   worker {worker} used slot {}", item.item_id());
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    println!("   Free after all workers: {}", pool.free_count());
}
