use super::{Histogram, Meter};
use crate::unit::DurationUnit;

/// A metric which meters completed operations and tracks the distribution of their durations.
///
/// The [`Histogram`] statistics of a timer are expressed in [`Timer::duration_unit`].
pub trait Timer: Meter + Histogram {
    fn duration_unit(&self) -> DurationUnit;
}
