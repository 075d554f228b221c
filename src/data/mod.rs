use std::{
    fmt::{self, Display},
    sync::Arc,
};

pub mod counter;
pub mod gauge;
pub mod histogram;
pub mod meter;
pub mod snapshot;
pub mod timer;

pub use self::{
    counter::{Counter, CounterDeltaTracker},
    gauge::{Gauge, GaugeValue},
    histogram::Histogram,
    meter::Meter,
    snapshot::Snapshot,
    timer::Timer,
};

/// The identity of a metric within a registry.
///
/// Names compare by value, ordering first by group, then type, then name.  Within a single
/// reporting group, where group and type are equal, this orders metrics by their bare name.
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct MetricName {
    group: String,
    metric_type: String,
    name: String,
}

impl MetricName {
    /// Creates a new `MetricName`.
    pub fn new<G, T, N>(group: G, metric_type: T, name: N) -> MetricName
    where
        G: Into<String>,
        T: Into<String>,
        N: Into<String>,
    {
        MetricName {
            group: group.into(),
            metric_type: metric_type.into(),
            name: name.into(),
        }
    }

    pub fn group(&self) -> &str { &self.group }

    pub fn metric_type(&self) -> &str { &self.metric_type }

    /// The bare name of the metric, without group or type.
    pub fn name(&self) -> &str { &self.name }

    /// The key this metric is grouped under when reported: `<group>.<type>`.
    pub fn group_key(&self) -> String { format!("{}.{}", self.group, self.metric_type) }
}

impl Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}.{}", self.group, self.metric_type, self.name)
    }
}

/// A registered metric.
///
/// The set of metric kinds is closed; reporters match on it exhaustively.  Each variant wraps a
/// shared, read-only view of the live metric.
#[derive(Clone)]
pub enum Metric {
    /// A single value of arbitrary displayable type.
    Gauge(Arc<dyn Gauge>),

    /// A signed count which may go up or down.
    Counter(Arc<dyn Counter>),

    /// An event count along with its mean and moving-average rates.
    Meter(Arc<dyn Meter>),

    /// Summary statistics and a snapshot over a distribution of values.
    Histogram(Arc<dyn Histogram>),

    /// A meter over completed operations and a histogram over their durations.
    Timer(Arc<dyn Timer>),
}

impl Metric {
    /// A short, lowercase name for the kind of this metric.
    pub fn kind(&self) -> &'static str {
        match *self {
            Metric::Gauge(_) => "gauge",
            Metric::Counter(_) => "counter",
            Metric::Meter(_) => "meter",
            Metric::Histogram(_) => "histogram",
            Metric::Timer(_) => "timer",
        }
    }
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "Metric::{}", self.kind()) }
}

#[cfg(test)]
mod tests {
    use super::{Metric, MetricName};
    use std::sync::{atomic::AtomicI64, Arc};

    #[test]
    fn test_metric_name_value_equality() {
        let a = MetricName::new("app", "requests", "ok");
        let b = MetricName::new("app".to_owned(), "requests", String::from("ok"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "app.requests.ok");
        assert_eq!(a.group_key(), "app.requests");
    }

    #[test]
    fn test_metric_name_ordering() {
        let mut names = vec![
            MetricName::new("b", "t", "a"),
            MetricName::new("a", "t", "z"),
            MetricName::new("a", "t", "b"),
        ];
        names.sort();

        let rendered = names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
        assert_eq!(rendered, vec!["a.t.b", "a.t.z", "b.t.a"]);
    }

    #[test]
    fn test_metric_kind() {
        let metric = Metric::Counter(Arc::new(AtomicI64::new(3)));
        assert_eq!(metric.kind(), "counter");
        assert_eq!(format!("{:?}", metric), "Metric::counter");
    }
}
