//! Rendering of aggregated tables for the terminal.
//!
//! Hours are shown with two decimals; absent cells stay blank and are never
//! printed as `0.00`.

use crate::cli::OutputFormat;
use serde::Serialize;
use std::collections::BTreeMap;
use txthours_core::{format_hours, fractional_hours, AggregatedResult, DocumentStats, Duration};

const TOTALS_LABEL: &str = "TOTALS";
const COLUMN_GAP: &str = "  ";
const DATE_COLUMN_WIDTH: usize = 10;

pub fn render_summary(result: &AggregatedResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(result)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&SummaryView::new(result))?),
    }
}

pub fn render_stats(stats: &DocumentStats) -> String {
    format!(
        "ok: {} day block(s), {} record(s), {} date(s)",
        stats.day_blocks, stats.records, stats.dates
    )
}

fn render_table(result: &AggregatedResult) -> String {
    let label_width = result
        .task_names()
        .iter()
        .map(|task| task.chars().count())
        .chain(std::iter::once(TOTALS_LABEL.len()))
        .max()
        .unwrap_or_default();

    let mut lines = Vec::with_capacity(result.task_names().len() + 2);

    let header = result
        .dates()
        .iter()
        .map(|date| date.to_string())
        .collect::<Vec<_>>();
    lines.push(table_line("", &header, label_width));

    for task in result.task_names() {
        let cells = result
            .dates()
            .iter()
            .map(|date| {
                result
                    .cell(task, *date)
                    .map(format_hours)
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();
        lines.push(table_line(task, &cells, label_width));
    }

    let totals = result
        .dates()
        .iter()
        .map(|date| format_hours(result.total(*date).unwrap_or_else(Duration::zero)))
        .collect::<Vec<_>>();
    lines.push(table_line(TOTALS_LABEL, &totals, label_width));

    lines.join("\n")
}

fn table_line(label: &str, cells: &[String], label_width: usize) -> String {
    let mut line = format!("{label:<label_width$}");
    for cell in cells {
        line.push_str(COLUMN_GAP);
        line.push_str(&format!("{cell:>DATE_COLUMN_WIDTH$}"));
    }
    line.trim_end().to_string()
}

#[derive(Debug, Serialize)]
struct SummaryView<'a> {
    dates: Vec<String>,
    tasks: Vec<TaskRowView<'a>>,
    totals: BTreeMap<String, HoursView>,
}

#[derive(Debug, Serialize)]
struct TaskRowView<'a> {
    task: &'a str,
    cells: BTreeMap<String, Option<HoursView>>,
}

#[derive(Debug, Serialize)]
struct HoursView {
    minutes: i64,
    hours: f64,
}

impl From<Duration> for HoursView {
    fn from(value: Duration) -> Self {
        Self {
            minutes: value.num_minutes(),
            hours: (fractional_hours(value) * 100.0).round() / 100.0,
        }
    }
}

impl<'a> SummaryView<'a> {
    fn new(result: &'a AggregatedResult) -> Self {
        let tasks = result
            .task_names()
            .iter()
            .map(|task| TaskRowView {
                task: task.as_str(),
                cells: result
                    .dates()
                    .iter()
                    .map(|date| (date.to_string(), result.cell(task, *date).map(HoursView::from)))
                    .collect(),
            })
            .collect();

        Self {
            dates: result.dates().iter().map(|date| date.to_string()).collect(),
            tasks,
            totals: result
                .totals()
                .iter()
                .map(|(date, total)| (date.to_string(), HoursView::from(*total)))
                .collect(),
        }
    }
}
