use crate::{
    control::Controller,
    error::{describe, ReporterError},
};
use crossbeam_channel::{bounded, select, tick, Receiver};
use parking_lot::Mutex;
use std::{
    any::Any,
    mem,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

/// A single reporting cycle.
pub trait Report: Send + 'static {
    fn report(&mut self) -> Result<(), ReporterError>;
}

enum State {
    Idle,
    Running(Controller),
    Stopped,
}

/// Runs a [`Report`] on a fixed schedule, on a dedicated thread.
///
/// A reporter starts out idle, runs once started, and can be stopped exactly once; a stopped
/// reporter cannot be started again.  Errors and panics from a cycle are logged and do not stop
/// the schedule.
pub struct PollingReporter<R: Report> {
    name: String,
    report: Arc<Mutex<R>>,
    stopped: Arc<AtomicBool>,
    state: Mutex<State>,
}

impl<R: Report> PollingReporter<R> {
    /// Creates an idle reporter.  `name` is used for the reporting thread and in log messages.
    pub fn new<N: Into<String>>(name: N, report: R) -> PollingReporter<R> {
        PollingReporter {
            name: name.into(),
            report: Arc::new(Mutex::new(report)),
            stopped: Arc::new(AtomicBool::new(false)),
            state: Mutex::new(State::Idle),
        }
    }

    pub fn name(&self) -> &str { &self.name }

    pub fn is_running(&self) -> bool {
        match *self.state.lock() {
            State::Running(_) => true,
            _ => false,
        }
    }

    /// Starts reporting every `period`, with the first cycle one period from now.
    ///
    /// Fails if `period` is zero, or if the reporter was already started or has been stopped.
    pub fn start(&self, period: Duration) -> Result<(), ReporterError> {
        if period == Duration::from_secs(0) {
            return Err(ReporterError::InvalidArgument("reporting period must be non-zero".to_owned()))
        }

        let mut state = self.state.lock();
        match *state {
            State::Idle => {},
            State::Running(_) => return Err(ReporterError::InvalidState(format!("{} is already running", self.name))),
            State::Stopped => return Err(ReporterError::InvalidState(format!("{} has been stopped", self.name))),
        }

        let (shutdown_tx, shutdown_rx) = bounded(0);
        let name = self.name.clone();
        let report = self.report.clone();
        let stopped = self.stopped.clone();
        let handle = thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || run(&name, period, &report, &stopped, shutdown_rx))
            .map_err(|e| ReporterError::InvalidState(format!("failed to spawn reporting thread: {}", e)))?;

        *state = State::Running(Controller::new(shutdown_tx, handle));
        debug!("{} started, reporting every {:?}", self.name, period);
        Ok(())
    }

    /// Runs a single cycle on the calling thread.
    ///
    /// Unlike scheduled cycles, the outcome is returned rather than logged.  Cycles never overlap:
    /// this waits for any scheduled cycle in progress.
    pub fn run_once(&self) -> Result<(), ReporterError> {
        let mut report = self.report.lock();
        if self.stopped.load(Ordering::Acquire) {
            return Err(ReporterError::InvalidState(format!("{} has been stopped", self.name)))
        }

        cycle(&mut *report)
    }

    /// Stops the reporter.
    ///
    /// Waits for a cycle already in progress to finish.  Once this returns, no further cycles
    /// will run.  Stopping an already-stopped reporter does nothing.
    pub fn stop(&self) {
        let mut state = self.state.lock();
        self.stopped.store(true, Ordering::Release);

        match mem::replace(&mut *state, State::Stopped) {
            State::Running(controller) => {
                controller.shutdown(&self.name);
                debug!("{} stopped", self.name);
            },
            State::Idle => debug!("{} stopped before being started", self.name),
            State::Stopped => return,
        }

        // Wait out any cycle started through `run_once`.
        drop(self.report.lock());
    }
}

impl<R: Report> Drop for PollingReporter<R> {
    fn drop(&mut self) { self.stop(); }
}

fn run<R: Report>(name: &str, period: Duration, report: &Mutex<R>, stopped: &AtomicBool, shutdown_rx: Receiver<()>) {
    let ticker = tick(period);
    loop {
        select! {
            recv(ticker) -> _ => {
                let mut report = report.lock();
                if stopped.load(Ordering::Acquire) {
                    break
                }

                match cycle(&mut *report) {
                    Ok(()) => trace!("{} completed a reporting cycle", name),
                    Err(e) => error!("{} failed to report: {}", name, describe(&e)),
                }
            },
            recv(shutdown_rx) -> _ => break,
        }
    }
}

/// Runs one cycle, converting a panic into an error.
fn cycle<R: Report>(report: &mut R) -> Result<(), ReporterError> {
    match panic::catch_unwind(AssertUnwindSafe(|| report.report())) {
        Ok(result) => result,
        Err(payload) => Err(ReporterError::Panicked(panic_message(&*payload))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::{PollingReporter, Report};
    use crate::error::ReporterError;
    use crossbeam_channel::{unbounded, Receiver, Sender};
    use std::{thread, time::Duration};

    /// Reports by sending the cycle number, failing or panicking on chosen cycles.
    struct Probe {
        cycles: usize,
        tx: Sender<usize>,
        fail_on: Option<usize>,
        panic_on: Option<usize>,
    }

    impl Report for Probe {
        fn report(&mut self) -> Result<(), ReporterError> {
            self.cycles += 1;
            if self.panic_on == Some(self.cycles) {
                panic!("probe panicked on cycle {}", self.cycles);
            }
            if self.fail_on == Some(self.cycles) {
                return Err(ReporterError::InvalidArgument("probe failure".to_owned()))
            }
            let _ = self.tx.send(self.cycles);
            Ok(())
        }
    }

    fn probe(fail_on: Option<usize>, panic_on: Option<usize>) -> (Probe, Receiver<usize>) {
        let (tx, rx) = unbounded();
        let probe = Probe {
            cycles: 0,
            tx,
            fail_on,
            panic_on,
        };
        (probe, rx)
    }

    #[test]
    fn test_run_once() {
        let (probe, rx) = probe(Some(2), None);
        let reporter = PollingReporter::new("probe", probe);

        assert!(reporter.run_once().is_ok());
        assert_eq!(rx.try_recv().unwrap(), 1);

        match reporter.run_once() {
            Err(ReporterError::InvalidArgument(_)) => {},
            other => panic!("expected failed cycle, got {:?}", other),
        }
        assert!(reporter.run_once().is_ok());
        assert_eq!(rx.try_recv().unwrap(), 3);
    }

    #[test]
    fn test_run_once_panic() {
        let (probe, _rx) = probe(None, Some(1));
        let reporter = PollingReporter::new("probe", probe);

        match reporter.run_once() {
            Err(ReporterError::Panicked(msg)) => assert_eq!(msg, "probe panicked on cycle 1"),
            other => panic!("expected panicked cycle, got {:?}", other),
        }
        assert!(reporter.run_once().is_ok());
    }

    #[test]
    fn test_schedule_survives_failures() {
        let (probe, rx) = probe(Some(2), Some(3));
        let reporter = PollingReporter::new("probe", probe);
        reporter.start(Duration::from_millis(5)).unwrap();
        assert!(reporter.is_running());

        // Cycles 2 and 3 fail, but the schedule carries on to cycle 4.
        let timeout = Duration::from_secs(5);
        assert_eq!(rx.recv_timeout(timeout).unwrap(), 1);
        assert_eq!(rx.recv_timeout(timeout).unwrap(), 4);

        reporter.stop();
        assert!(!reporter.is_running());
    }

    #[test]
    fn test_no_cycles_after_stop() {
        let (probe, rx) = probe(None, None);
        let reporter = PollingReporter::new("probe", probe);
        reporter.start(Duration::from_millis(1)).unwrap();
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());

        reporter.stop();
        let seen = rx.try_iter().count();
        thread::sleep(Duration::from_millis(20));
        assert!(rx.try_recv().is_err(), "cycle ran after stop (after {} drained)", seen);

        match reporter.run_once() {
            Err(ReporterError::InvalidState(_)) => {},
            other => panic!("expected invalid state, got {:?}", other),
        }
    }

    #[test]
    fn test_lifecycle_misuse() {
        let (probe, _rx) = probe(None, None);
        let reporter = PollingReporter::new("probe", probe);

        match reporter.start(Duration::from_secs(0)) {
            Err(ReporterError::InvalidArgument(_)) => {},
            other => panic!("expected invalid argument, got {:?}", other),
        }

        reporter.start(Duration::from_secs(60)).unwrap();
        match reporter.start(Duration::from_secs(60)) {
            Err(ReporterError::InvalidState(_)) => {},
            other => panic!("expected invalid state, got {:?}", other),
        }

        reporter.stop();
        reporter.stop();
        match reporter.start(Duration::from_secs(60)) {
            Err(ReporterError::InvalidState(_)) => {},
            other => panic!("expected invalid state, got {:?}", other),
        }
    }
}
