use crate::{
    clock::{self, Clock},
    console::ConsoleReporter,
    locale::{Locale, TimeZone},
    registry::{All, MetricPredicate, Registry},
};
use std::{
    io::{self, Write},
    sync::Arc,
};

/// A configuration builder for [`ConsoleReporter`].
pub struct Configuration {
    pub(crate) name: String,
    pub(crate) output: Box<dyn Write + Send>,
    pub(crate) predicate: Box<dyn MetricPredicate>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) time_zone: TimeZone,
    pub(crate) locale: Locale,
    pub(crate) console_width: usize,
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration {
            name: "console-reporter".to_owned(),
            output: Box::new(io::stdout()),
            predicate: Box::new(All),
            clock: Arc::new(clock::System),
            time_zone: TimeZone::default(),
            locale: Locale::system(),
            console_width: 80,
        }
    }
}

impl Configuration {
    /// Creates a new `Configuration` with default values.
    pub fn new() -> Configuration { Default::default() }

    /// Sets the reporter name.
    ///
    /// Defaults to `console-reporter`.
    ///
    /// The name is given to the reporting thread, and prefixes any log messages the reporter
    /// emits.
    pub fn name<N: Into<String>>(mut self, name: N) -> Self {
        self.name = name.into();
        self
    }

    /// Sets where reports are written.
    ///
    /// Defaults to standard output.
    pub fn output<W: Write + Send + 'static>(mut self, output: W) -> Self {
        self.output = Box::new(output);
        self
    }

    /// Sets which metrics are reported.
    ///
    /// Defaults to every metric in the registry.
    pub fn predicate<P: MetricPredicate + 'static>(mut self, predicate: P) -> Self {
        self.predicate = Box::new(predicate);
        self
    }

    /// Sets the clock used to timestamp each report.
    ///
    /// Defaults to the system clock.
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Sets the time zone timestamps are rendered in.
    ///
    /// Defaults to the local time zone.
    pub fn time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Sets the locale used for timestamps and decimal values.
    ///
    /// Defaults to the locale of the process, as given by `LC_ALL`, `LC_NUMERIC` or `LANG`, or
    /// `en_US` if none of those name a known locale.
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Sets the width the header line of each report is padded out to.
    ///
    /// Defaults to `80`.
    pub fn console_width(mut self, console_width: usize) -> Self {
        self.console_width = console_width;
        self
    }

    /// Creates an idle [`ConsoleReporter`] over `registry` based on this configuration.
    pub fn build(self, registry: Arc<dyn Registry>) -> ConsoleReporter { ConsoleReporter::from_config(self, registry) }
}
