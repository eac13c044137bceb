//! Error types for the boundary scanners.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kp_chart::ChartError;
use kp_lords::HoraryError;
use kp_time::TimeError;

/// Errors from scan configuration and sampling.
///
/// Search exhaustion is *not* an error: both scanners report it as
/// `Ok(None)` / a partial result so callers can distinguish "nothing
/// found" from a broken configuration.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ScanError {
    /// Invalid scan parameters (cadence, window, band, cap).
    InvalidConfig(&'static str),
    /// Error from chart assembly or the position provider.
    Chart(ChartError),
    /// Malformed timestamp input.
    Time(TimeError),
    /// Invalid horary number.
    Horary(HoraryError),
}

impl Display for ScanError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid scan config: {msg}"),
            Self::Chart(e) => write!(f, "chart error: {e}"),
            Self::Time(e) => write!(f, "time error: {e}"),
            Self::Horary(e) => write!(f, "horary error: {e}"),
        }
    }
}

impl Error for ScanError {}

impl From<ChartError> for ScanError {
    fn from(e: ChartError) -> Self {
        Self::Chart(e)
    }
}

impl From<TimeError> for ScanError {
    fn from(e: TimeError) -> Self {
        Self::Time(e)
    }
}

impl From<HoraryError> for ScanError {
    fn from(e: HoraryError) -> Self {
        Self::Horary(e)
    }
}
