//! Monthly splits and month-over-month comparison tables.

use std::collections::{BTreeMap, BTreeSet};

use crate::analyzers::types::MonthComparison;
use crate::table::{MonthKey, TransferTable};

/// Splits a table into per-month subsets for the requested keys.
///
/// Every requested key appears in the result; a month with no matching rows
/// maps to an empty subset. Rows outside all requested months are dropped.
pub fn split_by_month(
    table: &TransferTable,
    months: &[MonthKey],
) -> BTreeMap<MonthKey, TransferTable> {
    let mut subsets: BTreeMap<MonthKey, Vec<_>> =
        months.iter().map(|&m| (m, Vec::new())).collect();

    for row in table.rows() {
        if let Some(rows) = subsets.get_mut(&MonthKey::of(row.date)) {
            rows.push(row.clone());
        }
    }

    subsets
        .into_iter()
        .map(|(month, rows)| (month, TransferTable::new(rows)))
        .collect()
}

/// Builds a comparison table across the requested months, one row per month
/// in ascending order.
///
/// Each row carries the month's total transfers and daily average (total ÷
/// distinct dates with data; `None` for an empty month), plus diffs and
/// percent-changes against the earliest month. The baseline row's diff and
/// percent-change columns are `None`, as is any percent-change whose
/// baseline value is zero.
pub fn compare_months(table: &TransferTable, months: &[MonthKey]) -> Vec<MonthComparison> {
    let mut keys = months.to_vec();
    keys.sort();
    keys.dedup();

    let subsets = split_by_month(table, &keys);

    let totals: Vec<(MonthKey, u64, Option<f64>)> = keys
        .iter()
        .map(|&month| {
            let subset = &subsets[&month];
            let total: u64 = subset.rows().iter().map(|r| r.num_transfers).sum();
            let dates: BTreeSet<_> = subset.rows().iter().map(|r| r.date).collect();
            let daily_avg = if dates.is_empty() {
                None
            } else {
                Some(total as f64 / dates.len() as f64)
            };
            (month, total, daily_avg)
        })
        .collect();

    totals
        .iter()
        .enumerate()
        .map(|(i, &(month, total, daily_avg))| {
            if i == 0 {
                return MonthComparison {
                    month,
                    total_transfers: total,
                    daily_avg_transfers: daily_avg,
                    total_diff: None,
                    total_pct_change: None,
                    daily_avg_diff: None,
                    daily_avg_pct_change: None,
                };
            }

            let (_, base_total, base_avg) = totals[0];
            let daily_avg_diff = match (base_avg, daily_avg) {
                (Some(base), Some(avg)) => Some(avg - base),
                _ => None,
            };

            MonthComparison {
                month,
                total_transfers: total,
                daily_avg_transfers: daily_avg,
                total_diff: Some(total as i64 - base_total as i64),
                total_pct_change: pct_change(base_total as f64, total as f64),
                daily_avg_diff,
                daily_avg_pct_change: match (base_avg, daily_avg) {
                    (Some(base), Some(avg)) => pct_change(base, avg),
                    _ => None,
                },
            }
        })
        .collect()
}

/// `100 × diff / baseline`, or `None` when the baseline is zero.
fn pct_change(baseline: f64, value: f64) -> Option<f64> {
    if baseline == 0.0 {
        None
    } else {
        Some(100.0 * (value - baseline) / baseline)
    }
}
