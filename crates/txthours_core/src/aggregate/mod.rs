//! Aggregation engine: date x task duration matrix.
//!
//! # Responsibility
//! - Fold parsed records into per-date task sums (stage 1).
//! - Transpose into per-task date lookups (stage 2).
//! - Expose sorted, deduplicated date and task axes plus per-date totals.
//!
//! # Invariants
//! - Same task text within one date is summed, across blocks too.
//! - Task names compare by exact string equality; no case folding.
//! - Dates sort by calendar order; task names by byte-wise string order.
//! - A missing `(task, date)` cell is `None`, never a zero duration.

pub mod totals;

use crate::model::document::{CalendarDate, DayBlock, Document};
use chrono::Duration;
use std::collections::BTreeMap;

/// Task name -> summed duration for one date.
pub type TaskDurations = BTreeMap<String, Duration>;
/// Stage-1 index: date -> task sums.
pub type DateIndex = BTreeMap<CalendarDate, TaskDurations>;
/// Date -> duration for one task, or per-date totals.
pub type DateDurations = BTreeMap<CalendarDate, Duration>;
/// Stage-2 index: task name -> date -> duration.
pub type TaskIndex = BTreeMap<String, DateDurations>;

/// Read-only table produced from one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedResult {
    dates: Vec<CalendarDate>,
    task_names: Vec<String>,
    cells: TaskIndex,
    totals: DateDurations,
}

impl AggregatedResult {
    fn from_index(cells: TaskIndex, dates: Vec<CalendarDate>) -> Self {
        let task_names = cells.keys().cloned().collect();
        let totals = totals::sum_per_date(&dates, &cells);
        Self {
            dates,
            task_names,
            cells,
            totals,
        }
    }

    /// Column axis: distinct dates, ascending.
    pub fn dates(&self) -> &[CalendarDate] {
        &self.dates
    }

    /// Row axis: distinct task names, lexicographic.
    pub fn task_names(&self) -> &[String] {
        &self.task_names
    }

    /// Duration for one task on one date; `None` when nothing was recorded.
    pub fn cell(&self, task: &str, date: CalendarDate) -> Option<Duration> {
        self.cells
            .get(task)
            .and_then(|per_date| per_date.get(&date))
            .copied()
    }

    /// Total for one date; `None` only when the date is not a column.
    pub fn total(&self, date: CalendarDate) -> Option<Duration> {
        self.totals.get(&date).copied()
    }

    /// Every column's total, keyed by date.
    pub fn totals(&self) -> &DateDurations {
        &self.totals
    }

    /// Stage-2 index backing `cell`.
    pub fn cells(&self) -> &TaskIndex {
        &self.cells
    }
}

/// Builds the aggregated table for a parsed document.
///
/// Total: every record in a `Document` is already valid.
pub fn aggregate(document: &Document) -> AggregatedResult {
    let by_date = group_by_date(document);
    let dates = by_date.keys().copied().collect();
    let by_task = transpose(&by_date);
    AggregatedResult::from_index(by_task, dates)
}

/// Stage 1: sums each block per task, then merges blocks sharing a date.
pub fn group_by_date(document: &Document) -> DateIndex {
    let mut by_date = DateIndex::new();
    for block in document.blocks() {
        let day = by_date.entry(block.date()).or_default();
        for (task, duration) in sum_block(block) {
            accumulate(day, task, duration);
        }
    }
    by_date
}

/// Stage 2: reshapes date -> task into task -> date; no cross-date summing.
pub fn transpose(by_date: &DateIndex) -> TaskIndex {
    let mut by_task = TaskIndex::new();
    for (date, tasks) in by_date {
        for (task, duration) in tasks {
            accumulate(by_task.entry(task.clone()).or_default(), *date, *duration);
        }
    }
    by_task
}

fn sum_block(block: &DayBlock) -> TaskDurations {
    let mut sums = TaskDurations::new();
    for record in block.entries() {
        accumulate(&mut sums, record.task().to_string(), record.elapsed());
    }
    sums
}

fn accumulate<K: Ord>(map: &mut BTreeMap<K, Duration>, key: K, duration: Duration) {
    let slot = map.entry(key).or_insert_with(Duration::zero);
    *slot = *slot + duration;
}
