use crate::error::ReporterError;
use std::fmt;

/// A unit of time, used for meter rates and timer durations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl DurationUnit {
    /// Gets the short display label for this unit.
    ///
    /// Only sub-minute units have a label: `ns`, `us`, `ms` and `s`.  Anything coarser is
    /// rejected with [`ReporterError::InvalidArgument`].
    pub fn abbreviate(self) -> Result<&'static str, ReporterError> {
        match self {
            DurationUnit::Nanoseconds => Ok("ns"),
            DurationUnit::Microseconds => Ok("us"),
            DurationUnit::Milliseconds => Ok("ms"),
            DurationUnit::Seconds => Ok("s"),
            unit => Err(ReporterError::InvalidArgument(format!("unrecognized duration unit: {}", unit))),
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            DurationUnit::Nanoseconds => "nanoseconds",
            DurationUnit::Microseconds => "microseconds",
            DurationUnit::Milliseconds => "milliseconds",
            DurationUnit::Seconds => "seconds",
            DurationUnit::Minutes => "minutes",
            DurationUnit::Hours => "hours",
            DurationUnit::Days => "days",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::DurationUnit;
    use crate::error::ReporterError;

    #[test]
    fn test_abbreviate_supported_units() {
        assert_eq!(DurationUnit::Nanoseconds.abbreviate().unwrap(), "ns");
        assert_eq!(DurationUnit::Microseconds.abbreviate().unwrap(), "us");
        assert_eq!(DurationUnit::Milliseconds.abbreviate().unwrap(), "ms");
        assert_eq!(DurationUnit::Seconds.abbreviate().unwrap(), "s");
    }

    #[test]
    fn test_abbreviate_coarse_units() {
        for unit in &[DurationUnit::Minutes, DurationUnit::Hours, DurationUnit::Days] {
            match unit.abbreviate() {
                Err(ReporterError::InvalidArgument(msg)) => assert!(msg.contains(&unit.to_string())),
                other => panic!("expected invalid argument for {}, got {:?}", unit, other),
            }
        }
    }
}
