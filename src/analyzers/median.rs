//! Median transfer counts by hour of day and by day of week.
//!
//! Both aggregations run in two stages: first sum counts across all route
//! pairs sharing a (date, group) key, then take the median of those
//! per-date totals within each group. Taking medians over raw route-pair
//! rows instead would let days with more route pairs dominate.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analyzers::types::{DayOfWeekMedian, HourlyMedian};
use crate::analyzers::utility::median;
use crate::table::{DayOfWeek, TransferTable};

/// Median of per-date transfer totals for each hour present in the table.
///
/// Hours with no rows are absent from the output, not zero-filled. Output
/// is in ascending hour order.
pub fn median_by_hour(table: &TransferTable) -> Vec<HourlyMedian> {
    let mut daily_totals: BTreeMap<(NaiveDate, u8), u64> = BTreeMap::new();
    for row in table.rows() {
        *daily_totals.entry((row.date, row.hour)).or_default() += row.num_transfers;
    }

    let mut samples: BTreeMap<u8, Vec<u64>> = BTreeMap::new();
    for ((_, hour), total) in daily_totals {
        samples.entry(hour).or_default().push(total);
    }

    samples
        .into_iter()
        .map(|(hour, totals)| HourlyMedian {
            hour,
            median_transfers: median(&totals),
        })
        .collect()
}

/// Median of per-date transfer totals for each day of the week present in
/// the table, in fixed Mon..Sun order.
pub fn median_by_day_of_week(table: &TransferTable) -> Vec<DayOfWeekMedian> {
    let mut daily_totals: BTreeMap<(NaiveDate, DayOfWeek), u64> = BTreeMap::new();
    for row in table.rows() {
        *daily_totals.entry((row.date, row.day_of_week)).or_default() += row.num_transfers;
    }

    let mut samples: BTreeMap<DayOfWeek, Vec<u64>> = BTreeMap::new();
    for ((_, day), total) in daily_totals {
        samples.entry(day).or_default().push(total);
    }

    samples
        .into_iter()
        .map(|(day_of_week, totals)| DayOfWeekMedian {
            day_of_week,
            median_transfers: median(&totals),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TransferRecord;

    fn record(date: &str, hour: u8, day: DayOfWeek, routes: (&str, &str), count: u64) -> TransferRecord {
        TransferRecord {
            date: date.parse().unwrap(),
            hour,
            day_of_week: day,
            is_weekday: None,
            origin_route: routes.0.to_string(),
            destination_route: routes.1.to_string(),
            num_transfers: count,
        }
    }

    #[test]
    fn test_single_date_sums_route_pairs_before_median() {
        // Two route pairs in the same hour of the same day: the median is
        // taken over the one per-date total, 10 + 5 = 15.
        let table = TransferTable::new(vec![
            record("2025-03-01", 8, DayOfWeek::Sat, ("a", "b"), 10),
            record("2025-03-01", 8, DayOfWeek::Sat, ("c", "d"), 5),
        ]);

        assert_eq!(
            median_by_hour(&table),
            vec![HourlyMedian {
                hour: 8,
                median_transfers: 15.0
            }]
        );
    }

    #[test]
    fn test_two_days_two_hours_hand_computed() {
        let table = TransferTable::new(vec![
            // day 1, hour 8: total 12; hour 9: total 4
            record("2025-03-03", 8, DayOfWeek::Mon, ("a", "b"), 10),
            record("2025-03-03", 8, DayOfWeek::Mon, ("c", "d"), 2),
            record("2025-03-03", 9, DayOfWeek::Mon, ("a", "b"), 4),
            // day 2, hour 8: total 20; hour 9: total 6
            record("2025-03-04", 8, DayOfWeek::Tue, ("a", "b"), 20),
            record("2025-03-04", 9, DayOfWeek::Tue, ("a", "b"), 6),
        ]);

        assert_eq!(
            median_by_hour(&table),
            vec![
                HourlyMedian {
                    hour: 8,
                    median_transfers: 16.0 // median of [12, 20]
                },
                HourlyMedian {
                    hour: 9,
                    median_transfers: 5.0 // median of [4, 6]
                },
            ]
        );
    }

    #[test]
    fn test_absent_hours_are_omitted() {
        let table = TransferTable::new(vec![record(
            "2025-03-01",
            23,
            DayOfWeek::Sat,
            ("a", "b"),
            7,
        )]);

        let rows = median_by_hour(&table);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hour, 23);
    }

    #[test]
    fn test_empty_table_yields_no_rows() {
        assert!(median_by_hour(&TransferTable::default()).is_empty());
        assert!(median_by_day_of_week(&TransferTable::default()).is_empty());
    }

    #[test]
    fn test_day_of_week_fixed_week_order() {
        // Input ordered Sun-first; output must come back Mon..Sun.
        let table = TransferTable::new(vec![
            record("2025-03-02", 8, DayOfWeek::Sun, ("a", "b"), 30),
            record("2025-03-03", 8, DayOfWeek::Mon, ("a", "b"), 10),
            record("2025-03-08", 8, DayOfWeek::Sat, ("a", "b"), 20),
        ]);

        let days: Vec<DayOfWeek> = median_by_day_of_week(&table)
            .into_iter()
            .map(|r| r.day_of_week)
            .collect();
        assert_eq!(days, vec![DayOfWeek::Mon, DayOfWeek::Sat, DayOfWeek::Sun]);
    }

    #[test]
    fn test_day_of_week_medians_span_dates() {
        // Two Mondays with totals 10 and 30, one Tuesday with 8.
        let table = TransferTable::new(vec![
            record("2025-03-03", 8, DayOfWeek::Mon, ("a", "b"), 10),
            record("2025-03-10", 8, DayOfWeek::Mon, ("a", "b"), 30),
            record("2025-03-04", 8, DayOfWeek::Tue, ("a", "b"), 8),
        ]);

        assert_eq!(
            median_by_day_of_week(&table),
            vec![
                DayOfWeekMedian {
                    day_of_week: DayOfWeek::Mon,
                    median_transfers: 20.0
                },
                DayOfWeekMedian {
                    day_of_week: DayOfWeek::Tue,
                    median_transfers: 8.0
                },
            ]
        );
    }
}
