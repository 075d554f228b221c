use crate::unit::DurationUnit;

/// A metric exposing an event count and the rates at which those events occur.
///
/// Rates are computed by the meter itself and expressed per [`Meter::rate_unit`].
pub trait Meter: Send + Sync {
    /// Total number of events seen.
    fn count(&self) -> i64;

    /// Label for the kind of event being measured, e.g. `requests`.
    fn event_type(&self) -> &str;

    fn rate_unit(&self) -> DurationUnit;

    fn mean_rate(&self) -> f64;

    fn one_minute_rate(&self) -> f64;

    fn five_minute_rate(&self) -> f64;

    fn fifteen_minute_rate(&self) -> f64;
}
