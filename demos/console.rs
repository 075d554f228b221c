#[macro_use]
extern crate log;

use consolemic::{
    ConsoleReporter, DurationUnit, Histogram, Meter, Metric, MetricName, MetricsRegistry, Snapshot, Timer,
};
use getopts::Options;
use hdrhistogram::Histogram as HdrHistogram;
use parking_lot::Mutex;
use std::{
    env,
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

/// Times requests in microseconds.  Moving-average rates are not tracked, so every rate is the
/// mean rate.
struct RequestTimer {
    started: Instant,
    histogram: Mutex<HdrHistogram<u64>>,
}

impl RequestTimer {
    fn new() -> RequestTimer {
        RequestTimer {
            started: Instant::now(),
            histogram: Mutex::new(HdrHistogram::new_with_bounds(1, 60_000_000, 3).unwrap()),
        }
    }

    fn record(&self, elapsed: Duration) { self.histogram.lock().saturating_record(elapsed.as_micros() as u64); }
}

impl Meter for RequestTimer {
    fn count(&self) -> i64 { self.histogram.lock().len() as i64 }

    fn event_type(&self) -> &str { "requests" }

    fn rate_unit(&self) -> DurationUnit { DurationUnit::Seconds }

    fn mean_rate(&self) -> f64 {
        let elapsed = self.started.elapsed().as_secs_f64();
        if elapsed == 0.0 {
            return 0.0
        }
        self.count() as f64 / elapsed
    }

    fn one_minute_rate(&self) -> f64 { self.mean_rate() }

    fn five_minute_rate(&self) -> f64 { self.mean_rate() }

    fn fifteen_minute_rate(&self) -> f64 { self.mean_rate() }
}

impl Histogram for RequestTimer {
    fn min(&self) -> f64 { self.histogram.lock().min() as f64 }

    fn max(&self) -> f64 { self.histogram.lock().max() as f64 }

    fn mean(&self) -> f64 { self.histogram.lock().mean() }

    fn std_dev(&self) -> f64 { self.histogram.lock().stdev() }

    fn snapshot(&self) -> Snapshot { Snapshot::from_histogram(self.histogram.lock().clone()) }
}

impl Timer for RequestTimer {
    fn duration_unit(&self) -> DurationUnit { DurationUnit::Microseconds }
}

fn print_usage(program: &str, opts: &Options) {
    let brief = format!("Usage: {} [options]", program);
    print!("{}", opts.usage(&brief));
}

pub fn opts() -> Options {
    let mut opts = Options::new();

    opts.optopt("p", "period", "seconds between reports", "INTEGER");
    opts.optopt("d", "duration", "seconds to run for", "INTEGER");
    opts.optflag("h", "help", "print this help menu");

    opts
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = &args[0];
    let opts = opts();

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(f) => {
            error!("Failed to parse command line args: {}", f);
            return;
        }
    };

    if matches.opt_present("help") {
        print_usage(program, &opts);
        return;
    }

    let period = match matches.opt_get_default("period", 2u64) {
        Ok(p) => p,
        Err(e) => {
            error!("invalid period: {}", e);
            return;
        }
    };
    let duration = match matches.opt_get_default("duration", 10u64) {
        Ok(d) => d,
        Err(e) => {
            error!("invalid duration: {}", e);
            return;
        }
    };

    info!("reporting every {}s for {}s", period, duration);

    let registry = Arc::new(MetricsRegistry::new());
    let timer = Arc::new(RequestTimer::new());
    let in_flight = Arc::new(AtomicI64::new(0));
    let started = Instant::now();

    registry.register(MetricName::new("demo", "requests", "latency"), Metric::Timer(timer.clone()));
    registry.register(MetricName::new("demo", "requests", "in_flight"), Metric::Counter(in_flight.clone()));
    registry.register(
        MetricName::new("demo", "process", "uptime"),
        Metric::Gauge(Arc::new(move || format!("{}s", started.elapsed().as_secs()))),
    );

    // Generate some requests with a spread of latencies.
    thread::spawn(move || {
        let mut i = 0u64;
        loop {
            in_flight.fetch_add(1, Ordering::AcqRel);
            let t0 = Instant::now();
            thread::sleep(Duration::from_micros(250 + (i % 7) * 100));
            timer.record(t0.elapsed());
            in_flight.fetch_sub(1, Ordering::AcqRel);
            i += 1;
        }
    });

    let reporter = match ConsoleReporter::enable(registry, Duration::from_secs(period)) {
        Ok(r) => r,
        Err(e) => {
            error!("failed to start reporter: {}", e);
            return;
        }
    };

    thread::sleep(Duration::from_secs(duration));
    reporter.stop();
    info!("done");
}
