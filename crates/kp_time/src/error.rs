//! Error type for calendar validation.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from calendar/time handling.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimeError {
    /// Calendar fields are out of range (month, day, hour, ...).
    InvalidCalendar(&'static str),
    /// UTC offset outside the representable range.
    InvalidOffset(&'static str),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCalendar(msg) => write!(f, "invalid calendar: {msg}"),
            Self::InvalidOffset(msg) => write!(f, "invalid utc offset: {msg}"),
        }
    }
}

impl Error for TimeError {}
