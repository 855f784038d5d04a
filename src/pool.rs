//! Core pool implementation

use crate::config::PoolConfig;
use crate::errors::{PoolError, PoolResult};
use crate::events::PoolEvent;
use crate::factory::{FnFactory, ItemFactory};
use crate::metrics::{MetricsExporter, MetricsTracker, PoolMetrics};
use crate::policy::ExhaustionPolicy;

use log::{debug, info, trace};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

/// A pooled item that automatically returns to the pool when dropped
pub struct PooledItem<T> {
    value: Option<T>,
    item_id: usize,
    return_fn: Arc<dyn Fn(T, usize) + Send + Sync>,
}

impl<T> PooledItem<T> {
    fn new(value: T, item_id: usize, return_fn: Arc<dyn Fn(T, usize) + Send + Sync>) -> Self {
        Self {
            value: Some(value),
            item_id,
            return_fn,
        }
    }

    /// Slot id of this item: stable, assigned in creation order, never reused
    pub fn item_id(&self) -> usize {
        self.item_id
    }

    /// Take the inner value out without returning it to the pool.
    ///
    /// The pool keeps accounting the slot as in-use; the item never comes
    /// back. Dropping the emptied guard afterwards leaves the free/in-use
    /// partition untouched.
    pub fn into_inner(mut self) -> T {
        self.value.take().expect("value already taken")
    }
}

impl<T> Deref for PooledItem<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value.as_ref().expect("value already taken")
    }
}

impl<T> DerefMut for PooledItem<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.value.as_mut().expect("value already taken")
    }
}

impl<T: fmt::Debug> fmt::Debug for PooledItem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledItem")
            .field("item_id", &self.item_id)
            .field("value", &self.value)
            .finish()
    }
}

impl<T> Drop for PooledItem<T> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            (self.return_fn)(value, self.item_id);
        }
    }
}

/// One slot per item ever created. The index is the item's identity.
enum Slot<T> {
    Free(T),
    InUse,
    Destroyed,
}

struct PoolState<T> {
    slots: Vec<Slot<T>>,
    in_use: usize,
    draining: bool,
}

impl<T> PoolState<T> {
    /// First free slot in insertion order (first-fit, not LRU)
    fn first_free(&self) -> Option<usize> {
        self.slots.iter().position(|slot| matches!(slot, Slot::Free(_)))
    }

    fn free_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Free(_)))
            .count()
    }
}

/// Thread-safe pool of reusable items.
///
/// Items are partitioned into free and in-use sets behind a single lock;
/// `acquire` and the release path are each one critical section. `acquire`
/// hands out the first free item in creation order and, when none exists,
/// either grows through the factory or rejects, per
/// [`ExhaustionPolicy`].
pub struct Pool<T: Send> {
    state: Arc<Mutex<PoolState<T>>>,
    factory: Option<Arc<dyn ItemFactory<T>>>,
    config: Arc<PoolConfig>,
    metrics: Arc<MetricsTracker>,
}

impl<T: Send + 'static> Pool<T> {
    /// Create a pool pre-filled with the given items.
    ///
    /// A pool built this way has no factory: it cannot grow (the `Grow`
    /// policy degrades to rejection) and the drain path tears items down by
    /// dropping them.
    pub fn new(items: Vec<T>, config: PoolConfig) -> Self {
        let slots = items.into_iter().map(Slot::Free).collect();
        Self::build(slots, None, config)
    }

    /// Create a pool that pre-warms `initial_size` items through `factory`
    /// and uses it for growth and teardown.
    pub fn with_factory<F>(factory: F, initial_size: usize, config: PoolConfig) -> Self
    where
        F: ItemFactory<T> + 'static,
    {
        let slots = (0..initial_size)
            .map(|_| Slot::Free(factory.create()))
            .collect();
        Self::build(slots, Some(Arc::new(factory)), config)
    }

    /// Convenience over [`with_factory`](Pool::with_factory) for plain
    /// closures; teardown is a drop.
    pub fn from_fn<F>(create: F, initial_size: usize, config: PoolConfig) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::with_factory(FnFactory(create), initial_size, config)
    }

    fn build(
        slots: Vec<Slot<T>>,
        factory: Option<Arc<dyn ItemFactory<T>>>,
        config: PoolConfig,
    ) -> Self {
        debug!("pool created with {} pre-warmed items", slots.len());
        Self {
            state: Arc::new(Mutex::new(PoolState {
                slots,
                in_use: 0,
                draining: false,
            })),
            factory,
            config: Arc::new(config),
            metrics: Arc::new(MetricsTracker::new()),
        }
    }

    /// Get a free item, flipping it to in-use.
    ///
    /// When every item is checked out the configured [`ExhaustionPolicy`]
    /// decides: grow through the factory, or fail with
    /// [`PoolError::Exhausted`]. After [`destroy_all`](Pool::destroy_all)
    /// this always fails with [`PoolError::Draining`].
    pub fn acquire(&self) -> PoolResult<PooledItem<T>> {
        let mut state = self.state.lock();
        if state.draining {
            return Err(PoolError::Draining);
        }

        if let Some(id) = state.first_free() {
            let Slot::Free(value) = mem::replace(&mut state.slots[id], Slot::InUse) else {
                unreachable!("first_free returned a non-free slot")
            };
            state.in_use += 1;
            drop(state);

            self.metrics.total_acquired.fetch_add(1, Ordering::Relaxed);
            trace!("item {id} acquired");
            self.config.emit(PoolEvent::Acquired { item_id: id });
            return Ok(PooledItem::new(value, id, self.make_return_fn()));
        }

        match (self.config.exhaustion_policy, self.factory.as_ref()) {
            (ExhaustionPolicy::Grow, Some(factory)) => {
                let value = factory.create();
                let id = state.slots.len();
                state.slots.push(Slot::InUse);
                state.in_use += 1;
                let total = state.in_use;
                drop(state);

                self.metrics.total_acquired.fetch_add(1, Ordering::Relaxed);
                self.metrics.total_grown.fetch_add(1, Ordering::Relaxed);
                info!("no free item; pool grew to {total} items");
                self.config.emit(PoolEvent::Grew {
                    item_id: id,
                    total_items: total,
                });
                Ok(PooledItem::new(value, id, self.make_return_fn()))
            }
            _ => {
                drop(state);
                self.metrics.total_rejected.fetch_add(1, Ordering::Relaxed);
                debug!("no free item; acquire rejected");
                self.config.emit(PoolEvent::Rejected);
                Err(PoolError::Exhausted)
            }
        }
    }

    /// Get a free item, or `None` on exhaustion or drain
    pub fn try_acquire(&self) -> Option<PooledItem<T>> {
        self.acquire().ok()
    }

    /// Get an item asynchronously, polling until one frees up or the
    /// configured timeout elapses
    pub async fn acquire_async(&self) -> PoolResult<PooledItem<T>> {
        let timeout = self.config.acquire_timeout.unwrap_or(Duration::from_secs(30));

        tokio::time::timeout(timeout, async {
            loop {
                match self.acquire() {
                    Ok(item) => return Ok(item),
                    Err(PoolError::Exhausted) => {
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    }
                    Err(e) => return Err(e),
                }
            }
        })
        .await
        .map_err(|_| PoolError::Timeout(timeout))?
    }

    /// Tear the pool down.
    ///
    /// Every free item is handed to the factory's `destroy` (or dropped if
    /// the pool has none) right away; items currently checked out are
    /// destroyed the moment their guard returns them. The pool is terminal
    /// afterwards: `acquire` fails with [`PoolError::Draining`].
    ///
    /// Returns the number of items destroyed immediately.
    pub fn destroy_all(&self) -> usize {
        let mut state = self.state.lock();
        state.draining = true;

        let mut drained = Vec::new();
        for (id, slot) in state.slots.iter_mut().enumerate() {
            if matches!(slot, Slot::Free(_)) {
                let Slot::Free(value) = mem::replace(slot, Slot::Destroyed) else {
                    unreachable!()
                };
                drained.push((id, value));
            }
        }
        let still_out = state.in_use;
        drop(state);

        let destroyed = drained.len();
        for (id, value) in drained {
            destroy_item(self.factory.as_deref(), value);
            self.metrics.total_destroyed.fetch_add(1, Ordering::Relaxed);
            self.config.emit(PoolEvent::Destroyed { item_id: id });
        }
        debug!("pool drained: {destroyed} free items destroyed, {still_out} still checked out");
        destroyed
    }

    /// Current free items
    pub fn free_count(&self) -> usize {
        self.state.lock().free_count()
    }

    /// Current in-use items
    pub fn in_use_count(&self) -> usize {
        self.state.lock().in_use
    }

    /// Current pool size (free + in-use)
    pub fn total_count(&self) -> usize {
        let state = self.state.lock();
        state.free_count() + state.in_use
    }

    /// Snapshot counters and the current partition
    pub fn metrics(&self) -> PoolMetrics {
        let (free, in_use) = {
            let state = self.state.lock();
            (state.free_count(), state.in_use)
        };
        self.metrics.snapshot(free, in_use)
    }

    /// Export metrics as a HashMap
    pub fn export_metrics(&self) -> HashMap<String, String> {
        self.metrics().export()
    }

    /// Export metrics in Prometheus format
    pub fn export_metrics_prometheus(
        &self,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        MetricsExporter::export_prometheus(&self.metrics(), pool_name, tags)
    }

    fn make_return_fn(&self) -> Arc<dyn Fn(T, usize) + Send + Sync> {
        let state = Arc::clone(&self.state);
        let metrics = Arc::clone(&self.metrics);
        let config = Arc::clone(&self.config);
        let factory = self.factory.clone();

        Arc::new(move |value, id| {
            let mut guard = state.lock();
            if guard.draining {
                guard.slots[id] = Slot::Destroyed;
                guard.in_use -= 1;
                drop(guard);

                destroy_item(factory.as_deref(), value);
                metrics.total_destroyed.fetch_add(1, Ordering::Relaxed);
                config.emit(PoolEvent::Destroyed { item_id: id });
                return;
            }

            guard.slots[id] = Slot::Free(value);
            guard.in_use -= 1;
            drop(guard);

            metrics.total_released.fetch_add(1, Ordering::Relaxed);
            trace!("item {id} released");
            config.emit(PoolEvent::Released { item_id: id });
        })
    }
}

fn destroy_item<T>(factory: Option<&dyn ItemFactory<T>>, value: T) {
    match factory {
        Some(factory) => factory.destroy(value),
        None => drop(value),
    }
}
