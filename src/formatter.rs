use crate::{
    data::{CounterDeltaTracker, Histogram, Meter, Metric, MetricName},
    error::ReporterError,
    locale::Locale,
};

/// Renders metrics as indented, human-readable text.
///
/// Labels are right-aligned so that the `=` signs of a metric line up.  Counters are rendered
/// along with the change since they were last formatted by this formatter.
pub struct MetricFormatter {
    locale: Locale,
    counters: CounterDeltaTracker,
}

impl MetricFormatter {
    pub fn new(locale: Locale) -> MetricFormatter {
        MetricFormatter {
            locale,
            counters: CounterDeltaTracker::new(),
        }
    }

    /// Renders the current value(s) of `metric`, one line per value.
    ///
    /// Fails if a meter or timer uses a unit coarser than seconds, in which case nothing is
    /// rendered for the metric.
    pub fn format(&mut self, name: &MetricName, metric: &Metric) -> Result<String, ReporterError> {
        let mut out = String::new();
        match *metric {
            Metric::Gauge(ref gauge) => {
                out.push_str(&format!("    value = {}\n", gauge.value()));
            },
            Metric::Counter(ref counter) => {
                let current = counter.count();
                let delta = self.counters.delta(name, current);
                out.push_str(&format!("            count = {}\n", self.locale.format_integer(current)));
                out.push_str(&format!("    intervalCount = {}\n", self.locale.format_integer(delta)));
            },
            Metric::Meter(ref meter) => self.format_meter(&mut out, &**meter)?,
            Metric::Histogram(ref histogram) => self.format_histogram(&mut out, &**histogram, ""),
            Metric::Timer(ref timer) => {
                self.format_meter(&mut out, &**timer)?;
                let unit = timer.duration_unit().abbreviate()?;
                self.format_histogram(&mut out, &**timer, unit);
            },
        }
        Ok(out)
    }

    /// The counter state accumulated by this formatter.
    pub fn counters(&self) -> &CounterDeltaTracker { &self.counters }

    fn format_meter<M>(&self, out: &mut String, meter: &M) -> Result<(), ReporterError>
    where
        M: Meter + ?Sized,
    {
        let unit = meter.rate_unit().abbreviate()?;
        let event_type = meter.event_type();

        out.push_str(&format!("             count = {}\n", self.locale.format_integer(meter.count())));
        let rates = [
            ("         mean rate", meter.mean_rate()),
            ("     1-minute rate", meter.one_minute_rate()),
            ("     5-minute rate", meter.five_minute_rate()),
            ("    15-minute rate", meter.fifteen_minute_rate()),
        ];
        for &(label, rate) in rates.iter() {
            out.push_str(&format!(
                "{} = {} {}/{}\n",
                label,
                self.locale.format_decimal(rate),
                event_type,
                unit
            ));
        }
        Ok(())
    }

    /// Renders summary statistics and percentiles, each value directly followed by `unit`.
    fn format_histogram<H>(&self, out: &mut String, histogram: &H, unit: &str)
    where
        H: Histogram + ?Sized,
    {
        let snapshot = histogram.snapshot();
        let values = [
            ("               min =", histogram.min()),
            ("               max =", histogram.max()),
            ("              mean =", histogram.mean()),
            ("            stddev =", histogram.std_dev()),
            ("            median =", snapshot.median()),
            ("              75% <=", snapshot.p75()),
            ("              95% <=", snapshot.p95()),
            ("              98% <=", snapshot.p98()),
            ("              99% <=", snapshot.p99()),
            ("            99.9% <=", snapshot.p999()),
        ];
        for &(label, value) in values.iter() {
            out.push_str(&format!("{} {}{}\n", label, self.locale.format_decimal(value), unit));
        }
    }
}
