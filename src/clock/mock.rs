use crate::clock::Clock;
use std::sync::atomic::{AtomicU64, Ordering};

/// A manually-advanced clock.
pub struct Mock {
    offset: AtomicU64,
}

impl Mock {
    /// Creates a clock reading `offset` milliseconds since the Unix epoch.
    pub fn new(offset: u64) -> Self { Self { offset: AtomicU64::new(offset) } }

    pub fn increment(&self, amount: u64) { self.offset.fetch_add(amount, Ordering::Release); }

    pub fn set(&self, offset: u64) { self.offset.store(offset, Ordering::Release); }
}

impl Clock for Mock {
    fn time(&self) -> u64 { self.offset.load(Ordering::Acquire) }
}
