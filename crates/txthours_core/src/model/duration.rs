//! Elapsed-time helpers.
//!
//! Durations are `chrono::Duration` values at minute granularity. Conversion
//! to fractional hours happens only at the edge, for display.

pub use chrono::Duration;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Converts an exact duration into fractional hours.
///
/// The only precision loss is the final `f64` conversion.
pub fn fractional_hours(duration: Duration) -> f64 {
    duration.num_seconds() as f64 / SECONDS_PER_HOUR
}

/// Two-decimal fractional hours for display, e.g. 20 minutes -> `0.33`.
pub fn format_hours(duration: Duration) -> String {
    format!("{:.2}", fractional_hours(duration))
}

/// Sums durations in any order; the result is order-independent.
pub fn sum_durations<I>(durations: I) -> Duration
where
    I: IntoIterator<Item = Duration>,
{
    durations
        .into_iter()
        .fold(Duration::zero(), |acc, duration| acc + duration)
}

#[cfg(test)]
mod tests {
    use super::{format_hours, fractional_hours, sum_durations};
    use chrono::Duration;

    #[test]
    fn twenty_minutes_is_one_third_hour() {
        let hours = fractional_hours(Duration::minutes(20));
        assert_eq!(format!("{hours:.2}"), "0.33");
    }

    #[test]
    fn format_hours_rounds_to_two_decimals() {
        assert_eq!(format_hours(Duration::minutes(20)), "0.33");
        assert_eq!(format_hours(Duration::minutes(40)), "0.67");
        assert_eq!(format_hours(Duration::minutes(195)), "3.25");
        assert_eq!(format_hours(Duration::zero()), "0.00");
    }

    #[test]
    fn sum_of_nothing_is_zero() {
        assert_eq!(sum_durations(Vec::new()), Duration::zero());
    }

    #[test]
    fn sum_is_exact_at_minute_granularity() {
        let total = sum_durations([
            Duration::minutes(20),
            Duration::minutes(20),
            Duration::minutes(40),
        ]);
        assert_eq!(total, Duration::minutes(80));
        assert_eq!(fractional_hours(total), 80.0 / 60.0);
    }
}
