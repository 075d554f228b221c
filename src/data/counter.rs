use super::MetricName;
use fnv::FnvBuildHasher;
use hashbrown::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

/// A metric exposing a signed count.
///
/// Counts may be decremented, so consecutive readings are not required to be monotonic.
pub trait Counter: Send + Sync {
    fn count(&self) -> i64;
}

impl Counter for AtomicI64 {
    fn count(&self) -> i64 { self.load(Ordering::Acquire) }
}

/// Tracks the last count seen for each counter, yielding the change between readings.
///
/// Each reporter owns its own tracker, so two reporters over the same registry each see the full
/// interval delta.  Entries are never evicted: a counter that disappears and later comes back
/// under the same name continues from the last count seen for that name.
#[derive(Default)]
pub struct CounterDeltaTracker {
    data: HashMap<MetricName, i64, FnvBuildHasher>,
}

impl CounterDeltaTracker {
    pub fn new() -> CounterDeltaTracker { CounterDeltaTracker::default() }

    /// Records `current` as the latest count for `name`, returning the change since the previous
    /// reading.
    ///
    /// The first reading of a name is measured against zero.  The result is negative when the
    /// count went down.
    pub fn delta(&mut self, name: &MetricName, current: i64) -> i64 {
        match self.data.get_mut(name) {
            Some(last) => {
                let delta = current.wrapping_sub(*last);
                *last = current;
                delta
            },
            None => {
                self.data.insert(name.clone(), current);
                current
            },
        }
    }

    /// Gets the last count recorded for `name`, if any.
    pub fn last_seen(&self, name: &MetricName) -> Option<i64> { self.data.get(name).cloned() }

    /// Number of counters being tracked.
    pub fn len(&self) -> usize { self.data.len() }

    pub fn is_empty(&self) -> bool { self.data.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::{Counter, CounterDeltaTracker};
    use crate::data::MetricName;
    use std::sync::atomic::{AtomicI64, Ordering};

    #[test]
    fn test_first_delta_is_current_count() {
        let mut tracker = CounterDeltaTracker::new();
        let key = MetricName::new("app", "requests", "ok");

        assert_eq!(tracker.last_seen(&key), None);
        assert_eq!(tracker.delta(&key, 42), 42);
        assert_eq!(tracker.last_seen(&key), Some(42));
    }

    #[test]
    fn test_delta_sequence() {
        let mut tracker = CounterDeltaTracker::new();
        let key = MetricName::new("app", "requests", "ok");

        let deltas = [5, 5, 8, 3].iter().map(|c| tracker.delta(&key, *c)).collect::<Vec<_>>();
        assert_eq!(deltas, vec![5, 0, 3, -5]);
    }

    #[test]
    fn test_delta_independent_names() {
        let mut tracker = CounterDeltaTracker::new();
        let ok = MetricName::new("app", "requests", "ok");
        let failed = MetricName::new("app", "requests", "failed");

        assert_eq!(tracker.delta(&ok, 10), 10);
        assert_eq!(tracker.delta(&failed, 3), 3);
        assert_eq!(tracker.delta(&ok, 12), 2);
        assert_eq!(tracker.delta(&failed, 3), 0);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn test_independent_trackers() {
        let mut first = CounterDeltaTracker::new();
        let mut second = CounterDeltaTracker::new();
        let key = MetricName::new("app", "requests", "ok");

        assert_eq!(first.delta(&key, 4), 4);
        assert_eq!(first.delta(&key, 9), 5);
        assert_eq!(second.delta(&key, 9), 9);
    }

    #[test]
    fn test_atomic_counter() {
        let counter = AtomicI64::new(0);
        counter.fetch_add(7, Ordering::AcqRel);
        counter.fetch_sub(2, Ordering::AcqRel);
        assert_eq!(counter.count(), 5);
    }
}
