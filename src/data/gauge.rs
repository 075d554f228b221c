use std::fmt::{self, Display};

/// A metric exposing a single current value.
pub trait Gauge: Send + Sync {
    fn value(&self) -> GaugeValue;
}

impl<F, V> Gauge for F
where
    F: Fn() -> V + Send + Sync,
    V: Into<GaugeValue>,
{
    fn value(&self) -> GaugeValue { (self)().into() }
}

/// The current value of a gauge.
///
/// Gauge values are rendered as-is, without any locale-specific number formatting.  Floats always
/// carry a fraction, so `1.0` renders as `1.0` rather than `1`.
#[derive(Clone, Debug, PartialEq)]
pub enum GaugeValue {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl Display for GaugeValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GaugeValue::Signed(v) => write!(f, "{}", v),
            GaugeValue::Unsigned(v) => write!(f, "{}", v),
            GaugeValue::Float(v) if v.is_infinite() => f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" }),
            GaugeValue::Float(v) => write!(f, "{:?}", v),
            GaugeValue::Text(ref v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for GaugeValue {
    fn from(v: i64) -> Self { GaugeValue::Signed(v) }
}

impl From<i32> for GaugeValue {
    fn from(v: i32) -> Self { GaugeValue::Signed(v.into()) }
}

impl From<u64> for GaugeValue {
    fn from(v: u64) -> Self { GaugeValue::Unsigned(v) }
}

impl From<usize> for GaugeValue {
    fn from(v: usize) -> Self { GaugeValue::Unsigned(v as u64) }
}

impl From<f64> for GaugeValue {
    fn from(v: f64) -> Self { GaugeValue::Float(v) }
}

impl From<bool> for GaugeValue {
    fn from(v: bool) -> Self { GaugeValue::Text(v.to_string()) }
}

impl From<String> for GaugeValue {
    fn from(v: String) -> Self { GaugeValue::Text(v) }
}

impl<'a> From<&'a str> for GaugeValue {
    fn from(v: &'a str) -> Self { GaugeValue::Text(v.to_owned()) }
}

#[cfg(test)]
mod tests {
    use super::{Gauge, GaugeValue};

    #[test]
    fn test_closure_gauge() {
        let gauge = || 42i64;
        assert_eq!(gauge.value(), GaugeValue::Signed(42));
        assert_eq!(gauge.value().to_string(), "42");
    }

    #[test]
    fn test_gauge_value_display() {
        assert_eq!(GaugeValue::from(0.5).to_string(), "0.5");
        assert_eq!(GaugeValue::from(1.0).to_string(), "1.0");
        assert_eq!(GaugeValue::from(-3.0).to_string(), "-3.0");
        assert_eq!(GaugeValue::from(std::f64::INFINITY).to_string(), "Infinity");
        assert_eq!(GaugeValue::from("warm").to_string(), "warm");
        assert_eq!(GaugeValue::from(true).to_string(), "true");
        assert_eq!(GaugeValue::from(7usize).to_string(), "7");
    }
}
