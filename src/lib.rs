//! Periodic, human-readable reporting of metric registries.
//!
//! A [`ConsoleReporter`] takes a snapshot of a [`Registry`] on a fixed schedule, groups and
//! filters the metrics within it, and writes each one out as text.  The reporter reads values
//! that metrics have already computed; rates, percentiles and the like are supplied by the
//! [`Meter`], [`Histogram`] and [`Timer`] implementations registered with it.
//!
//! ```no_run
//! use consolemic::{ConsoleReporter, Metric, MetricName, MetricsRegistry};
//! use std::{sync::{atomic::AtomicI64, Arc}, time::Duration};
//!
//! let registry = Arc::new(MetricsRegistry::new());
//! let requests = Arc::new(AtomicI64::new(0));
//! registry.register(MetricName::new("web", "requests", "ok"), Metric::Counter(requests.clone()));
//!
//! let reporter = ConsoleReporter::enable(registry.clone(), Duration::from_secs(10)).unwrap();
//! # reporter.stop();
//! ```
#[macro_use]
extern crate log;

pub mod clock;
mod configuration;
mod console;
mod control;
mod data;
mod error;
mod formatter;
mod locale;
mod poller;
mod registry;
mod unit;

pub use self::{
    clock::Clock,
    configuration::Configuration,
    console::ConsoleReporter,
    data::{
        Counter, CounterDeltaTracker, Gauge, GaugeValue, Histogram, Meter, Metric, MetricName, Snapshot, Timer,
    },
    error::ReporterError,
    formatter::MetricFormatter,
    locale::{Locale, TimeZone},
    poller::{PollingReporter, Report},
    registry::{All, GroupedMetrics, MetricPredicate, MetricsRegistry, Registry},
    unit::DurationUnit,
};
