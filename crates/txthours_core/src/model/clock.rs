//! Clock values as written in a day log.
//!
//! # Responsibility
//! - Validate hour/minute pairs written without an AM/PM marker.
//! - Provide the absolute, subtractable time used after resolution.
//!
//! # Invariants
//! - `ClockTime::hour` is always within `1..=12`.
//! - `ClockTime::minute` is always within `0..=59`.

use chrono::Duration;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Smallest hour accepted on a 12-hour clock face.
pub const MIN_HOUR: u8 = 1;
/// Largest hour accepted on a 12-hour clock face.
pub const MAX_HOUR: u8 = 12;
/// Largest minute accepted in a clock time.
pub const MAX_MINUTE: u8 = 59;

/// Hour/minute pair without a meridiem.
///
/// Only meaningful when paired with a second `ClockTime` through
/// [`crate::resolve::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Creates a validated clock time.
    ///
    /// # Errors
    /// - `HourOutOfRange` when `hour` is outside `1..=12`.
    /// - `MinuteOutOfRange` when `minute` is greater than 59.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ClockTimeError> {
        if !(MIN_HOUR..=MAX_HOUR).contains(&hour) {
            return Err(ClockTimeError::HourOutOfRange(hour));
        }
        if minute > MAX_MINUTE {
            return Err(ClockTimeError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// Minutes from the `0:00` origin, reading the written hour literally.
    ///
    /// `12:35` maps to 755, so noon sorts after eleven o'clock the way it is
    /// read on a work day.
    pub(crate) fn face_minutes(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}", self.hour, self.minute)
    }
}

/// Clock value validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTimeError {
    HourOutOfRange(u8),
    MinuteOutOfRange(u8),
}

impl Display for ClockTimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HourOutOfRange(hour) => {
                write!(f, "hour {hour} is out of range (expected {MIN_HOUR}-{MAX_HOUR})")
            }
            Self::MinuteOutOfRange(minute) => {
                write!(f, "minute {minute} is out of range (expected 00-{MAX_MINUTE})")
            }
        }
    }
}

impl Error for ClockTimeError {}

/// Resolved point on a 24-hour-wide wheel, counted in minutes from `0:00`.
///
/// Values past 24:00 are legal: an end time rolled forward from `12:30`
/// lands there. The value is only used for ordering and subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AbsoluteTime(u32);

impl AbsoluteTime {
    pub(crate) fn from_minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    pub fn minutes_from_origin(&self) -> u32 {
        self.0
    }

    /// Exact elapsed time from `earlier` to `self`.
    pub fn since(&self, earlier: AbsoluteTime) -> Duration {
        Duration::minutes(i64::from(self.0) - i64::from(earlier.0))
    }
}
