use super::Snapshot;

/// A metric exposing summary statistics over a distribution of values.
pub trait Histogram: Send + Sync {
    fn min(&self) -> f64;

    fn max(&self) -> f64;

    fn mean(&self) -> f64;

    fn std_dev(&self) -> f64;

    /// Takes a point-in-time snapshot of the distribution for percentile queries.
    fn snapshot(&self) -> Snapshot;
}
