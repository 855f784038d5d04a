//! Exhaustion policies: what `acquire` does when no free item exists

/// Behavior of [`Pool::acquire`](crate::Pool::acquire) when every item is
/// checked out.
///
/// # Examples
///
/// ```
/// use slotpool::{ExhaustionPolicy, PoolConfig};
///
/// let config = PoolConfig::new()
///     .with_exhaustion_policy(ExhaustionPolicy::Reject);
///
/// assert_eq!(config.exhaustion_policy, ExhaustionPolicy::Reject);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExhaustionPolicy {
    /// Create a new item through the pool's factory and hand it out
    /// immediately. Growth is unbounded; each growth is reported through
    /// the event hook and the `total_grown` counter.
    ///
    /// A pool built without a factory cannot grow; under this policy it
    /// rejects instead.
    #[default]
    Grow,

    /// Fail the acquire with [`PoolError::Exhausted`](crate::PoolError::Exhausted)
    /// and leave the pool unchanged.
    Reject,
}

impl ExhaustionPolicy {
    /// Whether this policy allows the pool to create new items on demand.
    pub fn grows(&self) -> bool {
        matches!(self, ExhaustionPolicy::Grow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_grows() {
        assert_eq!(ExhaustionPolicy::default(), ExhaustionPolicy::Grow);
        assert!(ExhaustionPolicy::Grow.grows());
        assert!(!ExhaustionPolicy::Reject.grows());
    }
}
