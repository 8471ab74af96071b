//! Clock resolver: infers AM/PM for a written start/end pair.
//!
//! # Responsibility
//! - Turn two meridiem-less `ClockTime`s into an ordered absolute interval.
//!
//! # Invariants
//! - The written start is taken literally; only the end may roll forward.
//! - An end that reads earlier than the start rolls forward by exactly 12h.
//! - The resolved interval is strictly positive and shorter than 12h.
//! - A written end equal to the start is rejected, never rolled to 12h.

use crate::model::clock::{AbsoluteTime, ClockTime};
use chrono::Duration;
use std::error::Error;
use std::fmt::{Display, Formatter};

const HALF_DAY_MINUTES: u32 = 12 * 60;

/// Ordered pair of absolute times with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedInterval {
    start: AbsoluteTime,
    end: AbsoluteTime,
}

impl ResolvedInterval {
    pub fn start(&self) -> AbsoluteTime {
        self.start
    }

    pub fn end(&self) -> AbsoluteTime {
        self.end
    }

    pub fn elapsed(&self) -> Duration {
        self.end.since(self.start)
    }
}

/// Resolves a written time range into an absolute interval.
///
/// `9:00 - 9:20` stays as written (20 minutes). `12:35 - 3:50` reads
/// backwards on the clock face, so the end rolls past the 12-hour boundary
/// (3h15m).
///
/// # Errors
/// Returns `TimeRangeError` when start and end are the same clock time, which
/// typically means an end time that was never filled in.
pub fn resolve(start: ClockTime, end: ClockTime) -> Result<ResolvedInterval, TimeRangeError> {
    let start_minutes = start.face_minutes();
    let mut end_minutes = end.face_minutes();

    if end_minutes < start_minutes {
        end_minutes += HALF_DAY_MINUTES;
    }
    if end_minutes <= start_minutes {
        return Err(TimeRangeError { start, end });
    }

    Ok(ResolvedInterval {
        start: AbsoluteTime::from_minutes(start_minutes),
        end: AbsoluteTime::from_minutes(end_minutes),
    })
}

/// Zero-length time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRangeError {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl Display for TimeRangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "time range {} - {} has zero length; the end time must differ from the start time",
            self.start, self.end
        )
    }
}

impl Error for TimeRangeError {}

#[cfg(test)]
mod tests {
    use super::{resolve, TimeRangeError};
    use crate::model::clock::ClockTime;
    use chrono::Duration;

    fn clock(hour: u8, minute: u8) -> ClockTime {
        ClockTime::new(hour, minute).expect("test clock time should be valid")
    }

    #[test]
    fn forward_range_is_literal_difference() {
        let interval = resolve(clock(9, 0), clock(9, 20)).unwrap();
        assert_eq!(interval.elapsed(), Duration::minutes(20));
        assert_eq!(interval.start().minutes_from_origin(), 540);
        assert_eq!(interval.end().minutes_from_origin(), 560);
    }

    #[test]
    fn backwards_range_rolls_over_the_twelve_hour_boundary() {
        let interval = resolve(clock(12, 35), clock(3, 50)).unwrap();
        assert_eq!(interval.elapsed(), Duration::minutes(195));
    }

    #[test]
    fn morning_into_afternoon_rolls_over() {
        let interval = resolve(clock(11, 0), clock(1, 30)).unwrap();
        assert_eq!(interval.elapsed(), Duration::minutes(150));
    }

    #[test]
    fn into_noon_is_read_literally() {
        let interval = resolve(clock(11, 23), clock(12, 0)).unwrap();
        assert_eq!(interval.elapsed(), Duration::minutes(37));
    }

    #[test]
    fn out_of_noon_hour_rolls_over() {
        let interval = resolve(clock(12, 50), clock(1, 5)).unwrap();
        assert_eq!(interval.elapsed(), Duration::minutes(15));
    }

    #[test]
    fn backwards_within_noon_hour_spans_almost_half_a_day() {
        let interval = resolve(clock(12, 30), clock(12, 10)).unwrap();
        assert_eq!(interval.elapsed(), Duration::minutes(700));
    }

    #[test]
    fn noon_to_noon_is_rejected() {
        let err = resolve(clock(12, 0), clock(12, 0)).unwrap_err();
        assert_eq!(
            err,
            TimeRangeError {
                start: clock(12, 0),
                end: clock(12, 0),
            }
        );
    }

    #[test]
    fn zero_length_range_is_rejected() {
        let err = resolve(clock(9, 0), clock(9, 0)).unwrap_err();
        assert!(err.to_string().contains("9:00 - 9:00"));
    }

    #[test]
    fn every_resolved_interval_is_positive_and_under_twelve_hours() {
        for start_hour in 1..=12 {
            for end_hour in 1..=12 {
                for minute in [0, 29, 59] {
                    let start = clock(start_hour, 0);
                    let end = clock(end_hour, minute);
                    if let Ok(interval) = resolve(start, end) {
                        assert!(interval.elapsed() > Duration::zero());
                        assert!(interval.elapsed() < Duration::hours(12));
                    }
                }
            }
        }
    }
}
