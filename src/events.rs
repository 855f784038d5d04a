//! Observability hook: pool lifecycle events a caller can subscribe to
//!
//! The pool never prints. Anything worth noticing - an acquire, a release,
//! a growth or a rejection on exhaustion - is delivered to the hook
//! registered via [`PoolConfig::with_event_hook`](crate::PoolConfig::with_event_hook)
//! and mirrored in the [`PoolMetrics`](crate::PoolMetrics) counters.

use std::sync::Arc;

/// One lifecycle event observed by the pool.
///
/// Item ids are slot indexes: stable for the life of the pool, assigned in
/// creation order, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolEvent {
    /// A free item was handed out.
    Acquired { item_id: usize },

    /// An item was returned to the free set.
    Released { item_id: usize },

    /// No free item existed; the factory created a new one. `total_items`
    /// is the pool size after growth.
    Grew { item_id: usize, total_items: usize },

    /// No free item existed and the pool could not or would not grow.
    Rejected,

    /// An item was handed to the factory for teardown during a drain.
    Destroyed { item_id: usize },
}

/// Callback invoked for every [`PoolEvent`].
///
/// Hooks run outside the pool's lock, so a sink may call back into the pool
/// (to read counts, for instance) without deadlocking.
pub type EventHook = Arc<dyn Fn(&PoolEvent) + Send + Sync>;
