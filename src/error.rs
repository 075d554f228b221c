use std::{error, fmt, io};

/// Errors raised while configuring, driving or rendering a reporter.
#[derive(Debug)]
pub enum ReporterError {
    /// An argument was outside of what the reporter supports, such as a duration unit with no
    /// abbreviation or a zero reporting period.
    InvalidArgument(String),

    /// The reporter was used in a state that does not allow the operation, such as starting it
    /// twice or reporting after it was stopped.
    InvalidState(String),

    /// The output sink rejected a write or flush.
    SinkIo(io::Error),

    /// A metric or registry panicked while a cycle was running.
    Panicked(String),
}

impl fmt::Display for ReporterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ReporterError::InvalidArgument(ref msg) => write!(f, "invalid argument: {}", msg),
            ReporterError::InvalidState(ref msg) => write!(f, "invalid state: {}", msg),
            ReporterError::SinkIo(ref e) => write!(f, "failed to write to sink: {}", e),
            ReporterError::Panicked(ref msg) => write!(f, "reporting cycle panicked: {}", msg),
        }
    }
}

impl error::Error for ReporterError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            ReporterError::SinkIo(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReporterError {
    fn from(e: io::Error) -> ReporterError { ReporterError::SinkIo(e) }
}

/// Renders an error along with its chain of causes, outermost first.
pub(crate) fn describe(e: &dyn error::Error) -> String {
    let mut out = e.to_string();
    let mut cause = e.source();
    while let Some(inner) = cause {
        out.push_str(": caused by: ");
        out.push_str(&inner.to_string());
        cause = inner.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{describe, ReporterError};
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_describe_includes_cause() {
        let err = ReporterError::from(Error::new(ErrorKind::BrokenPipe, "pipe closed"));
        let described = describe(&err);
        assert!(described.starts_with("failed to write to sink: pipe closed"));
        assert!(described.ends_with("caused by: pipe closed"));
    }

    #[test]
    fn test_display_invalid_state() {
        let err = ReporterError::InvalidState("already started".to_owned());
        assert_eq!(err.to_string(), "invalid state: already started");
    }
}
