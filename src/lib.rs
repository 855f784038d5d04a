//! # slotpool
//!
//! Thread-safe object pool with first-fit reuse, configurable exhaustion
//! policies, and a factory-backed item lifecycle.
//!
//! ## Features
//!
//! - Free/in-use partition behind a single lock; acquire and release are
//!   each one critical section
//! - Automatic return of items via RAII (Drop trait)
//! - First-fit selection: the lowest free slot wins, ids are stable
//! - Grow-on-exhaustion (default) or reject-on-exhaustion, per
//!   [`ExhaustionPolicy`]
//! - Factory capability ([`ItemFactory`]) for creation and teardown,
//!   with a whole-pool drain via [`Pool::destroy_all`]
//! - Subscribable lifecycle events ([`PoolEvent`]) instead of printed
//!   notices, mirrored by [`PoolMetrics`] counters
//! - Async acquisition with timeout
//! - Metrics export as key/value pairs or Prometheus text
//!
//! ## Quick Start
//!
//! ```rust
//! use slotpool::{Pool, PoolConfig};
//!
//! let pool = Pool::new(vec![1, 2, 3], PoolConfig::default());
//! {
//!     let item = pool.acquire().unwrap();
//!     println!("Got: {}", *item);
//!     // Item automatically returned when `item` goes out of scope
//! }
//! assert_eq!(pool.free_count(), 3);
//! ```

mod config;
mod errors;
mod events;
mod factory;
mod metrics;
mod policy;
mod pool;

pub use config::PoolConfig;
pub use errors::{PoolError, PoolResult};
pub use events::{EventHook, PoolEvent};
pub use factory::{FnFactory, ItemFactory};
pub use metrics::{MetricsExporter, PoolMetrics};
pub use policy::ExhaustionPolicy;
pub use pool::{Pool, PooledItem};
