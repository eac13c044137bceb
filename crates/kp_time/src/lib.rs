//! Civil time axis for the KP temporal engine.
//!
//! Provides [`Moment`], the calendar timestamp (with UTC offset and
//! sub-second precision) used by every scanning component, plus
//! Julian-day conversion for continuous time arithmetic.
//!
//! Leap seconds are deliberately out of scope: ephemeris-grade time
//! scales live behind the position provider, and the scan axis only
//! needs a continuous civil-time line.

pub mod error;
pub mod julian;
pub mod moment;

pub use error::TimeError;
pub use julian::{calendar_to_jd, jd_to_calendar};
pub use moment::Moment;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Minutes per day.
pub const MINUTES_PER_DAY: f64 = 1_440.0;
