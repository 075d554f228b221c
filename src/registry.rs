use crate::data::{Metric, MetricName};
use fnv::FnvBuildHasher;
use hashbrown::HashMap;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Metrics grouped by their group key, each group ordered by metric name.
pub type GroupedMetrics = BTreeMap<String, BTreeMap<MetricName, Metric>>;

/// Decides whether a metric is included in a report.
pub trait MetricPredicate: Send + Sync {
    fn matches(&self, name: &MetricName, metric: &Metric) -> bool;
}

impl<F> MetricPredicate for F
where
    F: Fn(&MetricName, &Metric) -> bool + Send + Sync,
{
    fn matches(&self, name: &MetricName, metric: &Metric) -> bool { (self)(name, metric) }
}

/// Predicate which matches every metric.
#[derive(Clone, Copy, Debug, Default)]
pub struct All;

impl MetricPredicate for All {
    fn matches(&self, _: &MetricName, _: &Metric) -> bool { true }
}

/// A source of named metrics.
pub trait Registry: Send + Sync {
    /// Gets the metrics matching `predicate`, grouped and ordered.
    ///
    /// Each call must return a consistent view of the registry, and the ordering of groups and of
    /// metrics within a group must be stable across calls.
    fn grouped_metrics(&self, predicate: &dyn MetricPredicate) -> GroupedMetrics;
}

/// A thread-safe, in-memory metric registry.
///
/// Metrics are grouped under `<group>.<type>` when queried.
#[derive(Default)]
pub struct MetricsRegistry {
    metrics: RwLock<HashMap<MetricName, Metric, FnvBuildHasher>>,
}

impl MetricsRegistry {
    pub fn new() -> MetricsRegistry { MetricsRegistry::default() }

    /// Registers a metric, returning the metric previously registered under the same name.
    pub fn register(&self, name: MetricName, metric: Metric) -> Option<Metric> {
        self.metrics.write().insert(name, metric)
    }

    /// Removes a metric, returning it if it was registered.
    pub fn remove(&self, name: &MetricName) -> Option<Metric> { self.metrics.write().remove(name) }

    pub fn get(&self, name: &MetricName) -> Option<Metric> { self.metrics.read().get(name).cloned() }

    pub fn len(&self) -> usize { self.metrics.read().len() }

    pub fn is_empty(&self) -> bool { self.metrics.read().is_empty() }
}

impl Registry for MetricsRegistry {
    fn grouped_metrics(&self, predicate: &dyn MetricPredicate) -> GroupedMetrics {
        let metrics = self.metrics.read();

        let mut groups = GroupedMetrics::new();
        for (name, metric) in metrics.iter() {
            if predicate.matches(name, metric) {
                groups
                    .entry(name.group_key())
                    .or_insert_with(BTreeMap::new)
                    .insert(name.clone(), metric.clone());
            }
        }
        groups
    }
}
