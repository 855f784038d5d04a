//! Pool configuration options

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::events::{EventHook, PoolEvent};
use crate::policy::ExhaustionPolicy;

/// Configuration for pool behavior
///
/// # Examples
///
/// ```
/// use slotpool::{ExhaustionPolicy, PoolConfig};
/// use std::time::Duration;
///
/// let config = PoolConfig::new()
///     .with_exhaustion_policy(ExhaustionPolicy::Reject)
///     .with_acquire_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.exhaustion_policy, ExhaustionPolicy::Reject);
/// assert_eq!(config.acquire_timeout, Some(Duration::from_secs(5)));
/// ```
#[derive(Clone)]
pub struct PoolConfig {
    /// What `acquire` does when every item is checked out
    pub exhaustion_policy: ExhaustionPolicy,

    /// Timeout for `acquire_async`
    pub acquire_timeout: Option<Duration>,

    /// Sink for lifecycle events
    pub event_hook: Option<EventHook>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            exhaustion_policy: ExhaustionPolicy::Grow,
            acquire_timeout: Some(Duration::from_secs(30)),
            event_hook: None,
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exhaustion policy
    pub fn with_exhaustion_policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.exhaustion_policy = policy;
        self
    }

    /// Set the timeout used by `acquire_async`
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = Some(timeout);
        self
    }

    /// Register a sink for lifecycle events
    ///
    /// # Examples
    ///
    /// ```
    /// use slotpool::{Pool, PoolConfig, PoolEvent};
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let acquired = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&acquired);
    ///
    /// let config = PoolConfig::new().with_event_hook(move |event| {
    ///     if matches!(event, PoolEvent::Acquired { .. }) {
    ///         counter.fetch_add(1, Ordering::Relaxed);
    ///     }
    /// });
    ///
    /// let pool = Pool::new(vec![1, 2], config);
    /// let _item = pool.acquire().unwrap();
    /// assert_eq!(acquired.load(Ordering::Relaxed), 1);
    /// ```
    pub fn with_event_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&PoolEvent) + Send + Sync + 'static,
    {
        self.event_hook = Some(Arc::new(hook));
        self
    }

    pub(crate) fn emit(&self, event: PoolEvent) {
        if let Some(hook) = &self.event_hook {
            hook(&event);
        }
    }
}

impl fmt::Debug for PoolConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolConfig")
            .field("exhaustion_policy", &self.exhaustion_policy)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("event_hook", &self.event_hook.as_ref().map(|_| "..."))
            .finish()
    }
}
