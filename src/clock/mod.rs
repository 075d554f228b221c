use std::{
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

mod mock;
pub use self::mock::Mock;

/// A source of wall-clock time.
///
/// Reporters read the time through this trait rather than the system clock directly, so that
/// output can be made deterministic.
pub trait Clock: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn time(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn time(&self) -> u64 { (**self).time() }
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct System;

impl Clock for System {
    fn time(&self) -> u64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => (d.as_secs() * 1_000) + u64::from(d.subsec_millis()),
            // Wall clock set before the epoch.
            Err(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, Mock, System};
    use std::sync::Arc;

    #[test]
    fn test_system_clock_advances() {
        let clock = System;
        let t0 = clock.time();
        assert!(t0 > 1_500_000_000_000);
        assert!(clock.time() >= t0);
    }

    #[test]
    fn test_shared_clock() {
        let mock = Arc::new(Mock::new(1_000));
        let shared: Arc<dyn Clock> = mock.clone();
        mock.increment(500);
        assert_eq!(shared.time(), 1_500);

        mock.set(250);
        assert_eq!(shared.time(), 250);
    }
}
