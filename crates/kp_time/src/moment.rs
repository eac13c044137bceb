//! Calendar moment with UTC offset and sub-second precision.
//!
//! `Moment` is the canonical timestamp used throughout the engine. All
//! scanning arithmetic goes through the Julian-day representation so a
//! scan can step by arbitrary fractions of a second.

use crate::SECONDS_PER_DAY;
use crate::error::TimeError;
use crate::julian::{calendar_to_jd, days_in_month, jd_to_calendar};

/// Calendar date/time with a fixed UTC offset in hours.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Moment {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
    /// Offset from UTC in hours (e.g. 5.5 for +05:30).
    pub utc_offset_hours: f64,
}

impl Moment {
    /// Moment at UTC (offset 0).
    pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self::new(year, month, day, hour, minute, second, 0.0)
    }

    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
        utc_offset_hours: f64,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            utc_offset_hours,
        }
    }

    /// Validate calendar fields. Malformed input is a configuration
    /// error: fatal, surfaced immediately, never corrected.
    pub fn validate(&self) -> Result<(), TimeError> {
        if self.month < 1 || self.month > 12 {
            return Err(TimeError::InvalidCalendar("month must be 1-12"));
        }
        if self.day < 1 || self.day > days_in_month(self.year, self.month) {
            return Err(TimeError::InvalidCalendar("day out of range for month"));
        }
        if self.hour > 23 {
            return Err(TimeError::InvalidCalendar("hour must be 0-23"));
        }
        if self.minute > 59 {
            return Err(TimeError::InvalidCalendar("minute must be 0-59"));
        }
        if !(0.0..60.0).contains(&self.second) {
            return Err(TimeError::InvalidCalendar("second must be in [0, 60)"));
        }
        if !(-14.0..=14.0).contains(&self.utc_offset_hours) {
            return Err(TimeError::InvalidOffset("offset must be within +-14h"));
        }
        Ok(())
    }

    /// Julian Day of this moment on the UTC time line.
    pub fn to_jd_utc(&self) -> f64 {
        let day_frac = self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / SECONDS_PER_DAY;
        calendar_to_jd(self.year, self.month, day_frac) - self.utc_offset_hours / 24.0
    }

    /// Reconstruct a moment from a UTC Julian Day, expressed in the
    /// given UTC offset.
    pub fn from_jd_utc(jd_utc: f64, utc_offset_hours: f64) -> Self {
        let (year, month, day_frac) = jd_to_calendar(jd_utc + utc_offset_hours / 24.0);
        let day = day_frac.floor() as u32;
        let total_seconds = day_frac.fract() * SECONDS_PER_DAY;
        let hour = (total_seconds / 3600.0).floor() as u32;
        let minute = ((total_seconds % 3600.0) / 60.0).floor() as u32;
        let second = total_seconds % 60.0;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            utc_offset_hours,
        }
    }

    /// A new moment `seconds` later (negative to go back), same offset.
    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self::from_jd_utc(self.to_jd_utc() + seconds / SECONDS_PER_DAY, self.utc_offset_hours)
    }

    /// A new moment `minutes` later, same offset.
    pub fn add_minutes(&self, minutes: f64) -> Self {
        self.add_seconds(minutes * 60.0)
    }

    /// Signed distance to `other` in seconds (positive if `other` is later).
    pub fn seconds_until(&self, other: &Moment) -> f64 {
        (other.to_jd_utc() - self.to_jd_utc()) * SECONDS_PER_DAY
    }
}

impl std::fmt::Display for Moment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let whole = self.second as u32;
        let frac = self.second - whole as f64;
        let offset_min = (self.utc_offset_hours * 60.0).round() as i32;
        let sign = if offset_min < 0 { '-' } else { '+' };
        let off_h = offset_min.abs() / 60;
        let off_m = offset_min.abs() % 60;
        if frac.abs() < 1e-9 {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute, whole, sign, off_h, off_m
            )
        } else {
            write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:09.6}{}{:02}:{:02}",
                self.year, self.month, self.day, self.hour, self.minute, self.second, sign, off_h,
                off_m
            )
        }
    }
}
