use crate::{
    clock::Clock,
    configuration::Configuration,
    error::ReporterError,
    formatter::MetricFormatter,
    locale::{Locale, TimeZone},
    poller::{PollingReporter, Report},
    registry::{MetricPredicate, Registry},
};
use std::{io::Write, sync::Arc, time::Duration};

/// Periodically prints the metrics of a registry as human-readable text.
///
/// Each report starts with a timestamped header, followed by one section per metric group:
///
/// ```text
/// 3/4/12 5:06:07 AM ==============================================================
/// web.requests:
///   failed:
///             count = 2
///     intervalCount = 2
///
///   ok:
///     value = 42
///
///
/// ```
pub struct ConsoleReporter {
    poller: PollingReporter<Console>,
}

impl ConsoleReporter {
    /// Gets a builder to configure a `ConsoleReporter` instance with.
    pub fn builder() -> Configuration { Configuration::default() }

    /// Creates an idle reporter over `registry` which writes to standard output.
    pub fn new(registry: Arc<dyn Registry>) -> ConsoleReporter { Configuration::default().build(registry) }

    /// Creates a reporter over `registry` which writes every metric to standard output every
    /// `period`, and starts it.
    pub fn enable(registry: Arc<dyn Registry>, period: Duration) -> Result<ConsoleReporter, ReporterError> {
        let reporter = ConsoleReporter::new(registry);
        reporter.start(period)?;
        Ok(reporter)
    }

    pub(crate) fn from_config(conf: Configuration, registry: Arc<dyn Registry>) -> ConsoleReporter {
        let console = Console {
            registry,
            out: conf.output,
            predicate: conf.predicate,
            clock: conf.clock,
            time_zone: conf.time_zone,
            formatter: MetricFormatter::new(conf.locale.clone()),
            locale: conf.locale,
            console_width: conf.console_width,
        };

        ConsoleReporter {
            poller: PollingReporter::new(conf.name, console),
        }
    }

    /// Starts reporting every `period`.  See [`PollingReporter::start`].
    pub fn start(&self, period: Duration) -> Result<(), ReporterError> { self.poller.start(period) }

    /// Writes a single report immediately.  See [`PollingReporter::run_once`].
    pub fn run_once(&self) -> Result<(), ReporterError> { self.poller.run_once() }

    /// Stops reporting.  See [`PollingReporter::stop`].
    pub fn stop(&self) { self.poller.stop() }

    pub fn is_running(&self) -> bool { self.poller.is_running() }
}

/// The body of a single console report.
pub(crate) struct Console {
    registry: Arc<dyn Registry>,
    out: Box<dyn Write + Send>,
    predicate: Box<dyn MetricPredicate>,
    clock: Arc<dyn Clock>,
    time_zone: TimeZone,
    locale: Locale,
    console_width: usize,
    formatter: MetricFormatter,
}

impl Console {
    fn write_header(&mut self) -> Result<(), ReporterError> {
        let date_time = self.locale.format_date_time(self.clock.time(), &self.time_zone);
        let padding = self.console_width.saturating_sub(date_time.chars().count() + 1);
        writeln!(self.out, "{} {}", date_time, "=".repeat(padding))?;
        Ok(())
    }
}

impl Report for Console {
    fn report(&mut self) -> Result<(), ReporterError> {
        self.write_header()?;

        let groups = self.registry.grouped_metrics(&*self.predicate);
        for (group, metrics) in groups {
            writeln!(self.out, "{}:", group)?;
            for (name, metric) in &metrics {
                writeln!(self.out, "  {}:", name.name())?;
                let rendered = self.formatter.format(name, metric)?;
                self.out.write_all(rendered.as_bytes())?;
                writeln!(self.out)?;
            }
            writeln!(self.out)?;
        }
        writeln!(self.out)?;

        self.out.flush()?;
        Ok(())
    }
}
