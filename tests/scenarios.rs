//! End-to-end pool scenarios

use slotpool::{ExhaustionPolicy, Pool, PoolConfig, PoolError};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Pool of 3, acquire all, release two, acquire three more: the first two
/// reuse the released slots and the third grows the pool to 4.
#[test]
fn burst_scenario_under_grow_policy() {
    let pool = Pool::from_fn(String::new, 3, PoolConfig::default());

    let p1 = pool.acquire().unwrap();
    let p2 = pool.acquire().unwrap();
    let p3 = pool.acquire().unwrap();
    assert_eq!((pool.free_count(), pool.in_use_count()), (0, 3));

    drop(p1);
    drop(p2);
    assert_eq!((pool.free_count(), pool.in_use_count()), (2, 1));

    let r1 = pool.acquire().unwrap();
    let r2 = pool.acquire().unwrap();
    let r3 = pool.acquire().unwrap();

    let reused: HashSet<usize> = [r1.item_id(), r2.item_id()].into();
    assert_eq!(reused, HashSet::from([0, 1]));
    assert_eq!(r3.item_id(), 3);
    assert_eq!(pool.total_count(), 4);

    drop(p3);
    drop((r1, r2, r3));
    assert_eq!((pool.free_count(), pool.in_use_count()), (4, 0));
}

/// Same scenario under reject: the third extra acquire fails and the pool
/// size stays at 3.
#[test]
fn burst_scenario_under_reject_policy() {
    let config = PoolConfig::new().with_exhaustion_policy(ExhaustionPolicy::Reject);
    let pool = Pool::from_fn(String::new, 3, config);

    let p1 = pool.acquire().unwrap();
    let p2 = pool.acquire().unwrap();
    let _p3 = pool.acquire().unwrap();

    drop(p1);
    drop(p2);

    let _r1 = pool.acquire().unwrap();
    let _r2 = pool.acquire().unwrap();
    assert_eq!(pool.acquire().unwrap_err(), PoolError::Exhausted);
    assert_eq!(pool.total_count(), 3);
}

/// No item is ever held by two threads at once, and the partition balances
/// out once every thread is done.
#[test]
fn concurrent_acquire_never_hands_out_an_item_twice() {
    let pool = Arc::new(Pool::from_fn(|| 0u8, 4, PoolConfig::default()));
    let held_ids = Arc::new(Mutex::new(HashSet::new()));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = Arc::clone(&pool);
        let held_ids = Arc::clone(&held_ids);
        handles.push(std::thread::spawn(move || {
            for _ in 0..200 {
                let item = pool.acquire().unwrap();
                assert!(
                    held_ids.lock().unwrap().insert(item.item_id()),
                    "item handed out while already in use"
                );
                std::thread::yield_now();
                held_ids.lock().unwrap().remove(&item.item_id());
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(pool.in_use_count(), 0);
    assert_eq!(pool.free_count(), pool.total_count());
    let metrics = pool.metrics();
    assert_eq!(metrics.total_acquired, metrics.total_released);
    assert_eq!(metrics.total_acquired, 8 * 200);
}

#[tokio::test]
async fn tasks_share_a_fixed_pool_through_async_acquire() {
    let config = PoolConfig::new().with_exhaustion_policy(ExhaustionPolicy::Reject);
    let pool = Arc::new(Pool::from_fn(|| 0u8, 2, config));

    let mut handles = Vec::new();
    for _ in 0..6 {
        let pool = Arc::clone(&pool);
        handles.push(tokio::spawn(async move {
            let item = pool.acquire_async().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
            item.item_id()
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        seen.insert(handle.await.unwrap());
    }

    // Only the two fixed slots ever circulate.
    assert!(seen.is_subset(&HashSet::from([0, 1])));
    assert_eq!(pool.total_count(), 2);
    assert_eq!(pool.free_count(), 2);
}
