//! Metrics collection and export for pools

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Snapshot of a pool's counters and current partition
///
/// # Examples
///
/// ```
/// use slotpool::{Pool, PoolConfig};
///
/// let pool = Pool::new(vec![1, 2, 3], PoolConfig::default());
///
/// let _item = pool.acquire().unwrap();
/// let metrics = pool.metrics();
/// assert_eq!(metrics.total_acquired, 1);
/// assert_eq!(metrics.in_use_items, 1);
/// assert_eq!(metrics.free_items, 2);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "metrics", derive(serde::Serialize))]
pub struct PoolMetrics {
    /// Total successful acquires (including growth)
    pub total_acquired: usize,

    /// Total items returned to the free set
    pub total_released: usize,

    /// Times the pool grew on exhaustion
    pub total_grown: usize,

    /// Times an acquire was rejected on exhaustion
    pub total_rejected: usize,

    /// Items handed to the factory for teardown
    pub total_destroyed: usize,

    /// Current free items
    pub free_items: usize,

    /// Current in-use items
    pub in_use_items: usize,

    /// Current pool size (free + in-use)
    pub total_items: usize,

    /// In-use fraction of the pool (0.0 to 1.0)
    pub utilization: f64,
}

impl PoolMetrics {
    /// Export metrics as a HashMap
    pub fn export(&self) -> HashMap<String, String> {
        let mut metrics = HashMap::new();
        metrics.insert("total_acquired".to_string(), self.total_acquired.to_string());
        metrics.insert("total_released".to_string(), self.total_released.to_string());
        metrics.insert("total_grown".to_string(), self.total_grown.to_string());
        metrics.insert("total_rejected".to_string(), self.total_rejected.to_string());
        metrics.insert("total_destroyed".to_string(), self.total_destroyed.to_string());
        metrics.insert("free_items".to_string(), self.free_items.to_string());
        metrics.insert("in_use_items".to_string(), self.in_use_items.to_string());
        metrics.insert("total_items".to_string(), self.total_items.to_string());
        metrics.insert("utilization".to_string(), format!("{:.2}", self.utilization));
        metrics
    }
}

/// Renders a [`PoolMetrics`] snapshot in Prometheus exposition format
pub struct MetricsExporter;

impl MetricsExporter {
    /// Export metrics in Prometheus exposition format
    ///
    /// # Examples
    ///
    /// ```
    /// use slotpool::{Pool, PoolConfig};
    /// use std::collections::HashMap;
    ///
    /// let pool = Pool::new(vec![1, 2, 3], PoolConfig::default());
    ///
    /// let mut tags = HashMap::new();
    /// tags.insert("service".to_string(), "api".to_string());
    ///
    /// let output = pool.export_metrics_prometheus("effects", Some(&tags));
    /// assert!(output.contains("slotpool_items_in_use"));
    /// assert!(output.contains("service=\"api\""));
    /// ```
    pub fn export_prometheus(
        metrics: &PoolMetrics,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        let mut output = String::new();
        let labels = Self::format_labels(pool_name, tags);

        // Gauge metrics
        output.push_str("# HELP slotpool_items_in_use Current in-use items\n");
        output.push_str("# TYPE slotpool_items_in_use gauge\n");
        output.push_str(&format!("slotpool_items_in_use{{{}}} {}\n", labels, metrics.in_use_items));

        output.push_str("# HELP slotpool_items_free Current free items\n");
        output.push_str("# TYPE slotpool_items_free gauge\n");
        output.push_str(&format!("slotpool_items_free{{{}}} {}\n", labels, metrics.free_items));

        output.push_str("# HELP slotpool_items Current pool size\n");
        output.push_str("# TYPE slotpool_items gauge\n");
        output.push_str(&format!("slotpool_items{{{}}} {}\n", labels, metrics.total_items));

        output.push_str("# HELP slotpool_utilization In-use fraction of the pool\n");
        output.push_str("# TYPE slotpool_utilization gauge\n");
        output.push_str(&format!("slotpool_utilization{{{}}} {:.2}\n", labels, metrics.utilization));

        // Counter metrics
        output.push_str("# HELP slotpool_acquired_total Total successful acquires\n");
        output.push_str("# TYPE slotpool_acquired_total counter\n");
        output.push_str(&format!("slotpool_acquired_total{{{}}} {}\n", labels, metrics.total_acquired));

        output.push_str("# HELP slotpool_released_total Total items returned\n");
        output.push_str("# TYPE slotpool_released_total counter\n");
        output.push_str(&format!("slotpool_released_total{{{}}} {}\n", labels, metrics.total_released));

        output.push_str("# HELP slotpool_grown_total Growth events on exhaustion\n");
        output.push_str("# TYPE slotpool_grown_total counter\n");
        output.push_str(&format!("slotpool_grown_total{{{}}} {}\n", labels, metrics.total_grown));

        output.push_str("# HELP slotpool_rejected_total Rejected acquires on exhaustion\n");
        output.push_str("# TYPE slotpool_rejected_total counter\n");
        output.push_str(&format!("slotpool_rejected_total{{{}}} {}\n", labels, metrics.total_rejected));

        output.push_str("# HELP slotpool_destroyed_total Items destroyed by the drain path\n");
        output.push_str("# TYPE slotpool_destroyed_total counter\n");
        output.push_str(&format!("slotpool_destroyed_total{{{}}} {}\n", labels, metrics.total_destroyed));

        output
    }

    fn format_labels(pool_name: &str, tags: Option<&HashMap<String, String>>) -> String {
        let mut labels = vec![format!("pool=\"{}\"", pool_name)];

        if let Some(tags) = tags {
            for (key, value) in tags {
                labels.push(format!("{}=\"{}\"", key, value));
            }
        }

        labels.join(",")
    }
}

/// Internal counter tracker
pub(crate) struct MetricsTracker {
    pub total_acquired: AtomicUsize,
    pub total_released: AtomicUsize,
    pub total_grown: AtomicUsize,
    pub total_rejected: AtomicUsize,
    pub total_destroyed: AtomicUsize,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self {
            total_acquired: AtomicUsize::new(0),
            total_released: AtomicUsize::new(0),
            total_grown: AtomicUsize::new(0),
            total_rejected: AtomicUsize::new(0),
            total_destroyed: AtomicUsize::new(0),
        }
    }

    pub fn snapshot(&self, free: usize, in_use: usize) -> PoolMetrics {
        let total = free + in_use;
        let utilization = if total > 0 {
            in_use as f64 / total as f64
        } else {
            0.0
        };

        PoolMetrics {
            total_acquired: self.total_acquired.load(Ordering::Relaxed),
            total_released: self.total_released.load(Ordering::Relaxed),
            total_grown: self.total_grown.load(Ordering::Relaxed),
            total_rejected: self.total_rejected.load(Ordering::Relaxed),
            total_destroyed: self.total_destroyed.load(Ordering::Relaxed),
            free_items: free,
            in_use_items: in_use,
            total_items: total,
            utilization,
        }
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_computes_utilization() {
        let tracker = MetricsTracker::new();
        tracker.total_acquired.store(3, Ordering::Relaxed);

        let metrics = tracker.snapshot(1, 3);
        assert_eq!(metrics.total_acquired, 3);
        assert_eq!(metrics.total_items, 4);
        assert!((metrics.utilization - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_pool_has_zero_utilization() {
        let metrics = MetricsTracker::new().snapshot(0, 0);
        assert_eq!(metrics.utilization, 0.0);
    }

    #[test]
    fn prometheus_export_carries_labels() {
        let metrics = MetricsTracker::new().snapshot(2, 1);
        let output = MetricsExporter::export_prometheus(&metrics, "demo", None);

        assert!(output.contains("slotpool_items_free{pool=\"demo\"} 2"));
        assert!(output.contains("slotpool_items_in_use{pool=\"demo\"} 1"));
        assert!(output.contains("# TYPE slotpool_acquired_total counter"));
    }
}
