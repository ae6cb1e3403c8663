//! Output row types produced by the aggregation pipeline.

use serde::Serialize;

use crate::table::{DayOfWeek, MonthKey};

/// Median of per-date transfer totals for one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyMedian {
    pub hour: u8,
    pub median_transfers: f64,
}

/// Median of per-date transfer totals for one day of the week.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayOfWeekMedian {
    pub day_of_week: DayOfWeek,
    pub median_transfers: f64,
}

/// One row of a month-over-month comparison table.
///
/// `None` is the missing-value marker: the baseline (earliest) month carries
/// no diffs, an empty month has no daily average, and a zero baseline yields
/// no percent-change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthComparison {
    pub month: MonthKey,
    pub total_transfers: u64,
    pub daily_avg_transfers: Option<f64>,
    pub total_diff: Option<i64>,
    pub total_pct_change: Option<f64>,
    pub daily_avg_diff: Option<f64>,
    pub daily_avg_pct_change: Option<f64>,
}
