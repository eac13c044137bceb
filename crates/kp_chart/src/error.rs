//! Error types for chart assembly.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kp_time::TimeError;

use crate::provider::BodyId;

/// Errors from chart configuration and assembly.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ChartError {
    /// The ayanamsa/house-system pair is not supported by the provider.
    /// Fatal configuration error; never retried.
    UnsupportedConfig(&'static str),
    /// Invalid geographic location parameter.
    InvalidLocation(&'static str),
    /// Malformed timestamp input.
    Time(TimeError),
    /// A required body is absent from the provider output.
    MissingBody(BodyId),
    /// Provider-internal failure (I/O, kernel lookup, ...).
    Provider(String),
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedConfig(msg) => write!(f, "unsupported configuration: {msg}"),
            Self::InvalidLocation(msg) => write!(f, "invalid location: {msg}"),
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::MissingBody(id) => write!(f, "body missing from provider output: {}", id.name()),
            Self::Provider(msg) => write!(f, "position provider error: {msg}"),
        }
    }
}

impl Error for ChartError {}

impl From<TimeError> for ChartError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}
