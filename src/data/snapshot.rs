use hdrhistogram::Histogram as HdrHistogram;

/// A point-in-time view of a distribution.
///
/// Snapshots are immutable once taken, and answer quantile queries either from a sorted set of
/// sampled values or from a recorded `HdrHistogram`.
pub struct Snapshot {
    inner: Inner,
}

enum Inner {
    Sampled(Vec<f64>),
    Recorded(HdrHistogram<u64>),
}

impl Snapshot {
    /// Creates a snapshot from a set of sampled values, in any order.
    pub fn from_values<I>(values: I) -> Snapshot
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(|a, b| a.total_cmp(b));

        Snapshot {
            inner: Inner::Sampled(values),
        }
    }

    /// Creates a snapshot from a recorded histogram.
    pub fn from_histogram(histogram: HdrHistogram<u64>) -> Snapshot {
        Snapshot {
            inner: Inner::Recorded(histogram),
        }
    }

    /// Gets the value at the given quantile.
    ///
    /// The quantile is clamped between `0.0` and `1.0`.  Sampled snapshots interpolate linearly
    /// between the two closest values.  An empty snapshot yields `0.0` for every quantile.
    pub fn value(&self, quantile: f64) -> f64 {
        let quantile = if quantile.is_nan() { 0.0 } else { quantile.max(0.0).min(1.0) };

        match self.inner {
            Inner::Sampled(ref values) => interpolate(values, quantile),
            Inner::Recorded(ref histogram) => {
                if histogram.is_empty() {
                    return 0.0
                }

                histogram.value_at_quantile(quantile) as f64
            },
        }
    }

    /// Number of values in this snapshot.
    pub fn len(&self) -> usize {
        match self.inner {
            Inner::Sampled(ref values) => values.len(),
            Inner::Recorded(ref histogram) => histogram.len() as usize,
        }
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn median(&self) -> f64 { self.value(0.5) }

    pub fn p75(&self) -> f64 { self.value(0.75) }

    pub fn p95(&self) -> f64 { self.value(0.95) }

    pub fn p98(&self) -> f64 { self.value(0.98) }

    pub fn p99(&self) -> f64 { self.value(0.99) }

    pub fn p999(&self) -> f64 { self.value(0.999) }
}

impl From<HdrHistogram<u64>> for Snapshot {
    fn from(histogram: HdrHistogram<u64>) -> Snapshot { Snapshot::from_histogram(histogram) }
}

fn interpolate(values: &[f64], quantile: f64) -> f64 {
    if values.is_empty() {
        return 0.0
    }

    let pos = quantile * (values.len() + 1) as f64;
    if pos < 1.0 {
        return values[0]
    }
    if pos >= values.len() as f64 {
        return values[values.len() - 1]
    }

    let index = pos as usize;
    let lower = values[index - 1];
    let upper = values[index];
    lower + (pos - pos.floor()) * (upper - lower)
}
