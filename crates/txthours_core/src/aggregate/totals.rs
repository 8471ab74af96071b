//! Totals computer: one summed duration per date column.
//!
//! # Invariants
//! - Every date in the table has a total, zero when no cell is present.
//! - `total[d]` equals the sum of present cells in column `d`.

use crate::aggregate::{AggregatedResult, DateDurations, TaskIndex};
use crate::model::document::CalendarDate;
use crate::model::duration::sum_durations;

/// Recomputes per-date totals from an aggregated table.
pub fn compute_totals(result: &AggregatedResult) -> DateDurations {
    sum_per_date(result.dates(), result.cells())
}

pub(crate) fn sum_per_date(dates: &[CalendarDate], cells: &TaskIndex) -> DateDurations {
    dates
        .iter()
        .map(|date| {
            let total = sum_durations(
                cells
                    .values()
                    .filter_map(|per_date| per_date.get(date).copied()),
            );
            (*date, total)
        })
        .collect()
}
