//! Author: [Seclususs](https://github.com/seclususs)

use std::{fmt, io, time};

#[derive(Debug)]
pub enum BoostError {
    IoError(io::Error),
    NotElevated,
    CommandFailed(String),
    Timeout(time::Duration),
    SensorMissing(String),
    ParseError(String),
    InvalidInput(String),
    SystemCheckFailed(String),
}

impl BoostError {
    /// Short tag for the failure cause, used when a boundary collapses the error.
    pub fn cause(&self) -> &'static str {
        match self {
            BoostError::IoError(_) => "io",
            BoostError::NotElevated => "not-elevated",
            BoostError::CommandFailed(_) => "execution-failure",
            BoostError::Timeout(_) => "timeout",
            BoostError::SensorMissing(_) => "missing-sensor",
            BoostError::ParseError(_) => "parse-failure",
            BoostError::InvalidInput(_) => "invalid-input",
            BoostError::SystemCheckFailed(_) => "system-check",
        }
    }
}

impl fmt::Display for BoostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoostError::IoError(e) => write!(f, "I/O Error: {e}"),
            BoostError::NotElevated => write!(f, "Root access not granted"),
            BoostError::CommandFailed(s) => write!(f, "Command Failed: {s}"),
            BoostError::Timeout(d) => write!(f, "Command timed out after {}ms", d.as_millis()),
            BoostError::SensorMissing(s) => write!(f, "Sensor Missing: {s}"),
            BoostError::ParseError(s) => write!(f, "Parse Error: {s}"),
            BoostError::InvalidInput(s) => write!(f, "Invalid Input: {s}"),
            BoostError::SystemCheckFailed(s) => write!(f, "System Check Failed: {s}"),
        }
    }
}

impl std::error::Error for BoostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BoostError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BoostError {
    fn from(err: io::Error) -> Self {
        BoostError::IoError(err)
    }
}

impl From<rustix::io::Errno> for BoostError {
    fn from(err: rustix::io::Errno) -> Self {
        BoostError::IoError(err.into())
    }
}
