use std::path::{Path, PathBuf};

use transfer_stats::analyzers::median::{median_by_day_of_week, median_by_hour};
use transfer_stats::analyzers::monthly::compare_months;
use transfer_stats::chart::BarChart;
use transfer_stats::loader::{normalize, read_transfers};
use transfer_stats::table::{DayOfWeek, MonthKey};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/city_hall_transfers_24hh.csv")
}

#[test]
fn test_full_pipeline() {
    let table = read_transfers(fixture_path()).expect("failed to load fixture");
    assert_eq!(table.len(), 8);

    // March reporting window, the February row drops out.
    let march = table.filter_date_range(
        "2025-03-01".parse().unwrap(),
        "2025-03-31".parse().unwrap(),
    );
    assert_eq!(march.len(), 7);

    // Hour 8 per-date totals: 15 (Mar 1), 20 (Mar 3), 16 (Mar 4) -> median 16.
    // Hour 9 per-date totals: 4, 6, 8 -> median 6.
    let hourly = median_by_hour(&march);
    assert_eq!(hourly.len(), 2);
    assert_eq!(hourly[0].hour, 8);
    assert_eq!(hourly[0].median_transfers, 16.0);
    assert_eq!(hourly[1].hour, 9);
    assert_eq!(hourly[1].median_transfers, 6.0);

    let html = BarChart::from_hourly(&hourly, "City Hall : Median hourly #transfers : March 2025")
        .to_html();
    assert!(html.contains("City Hall"));
    assert!(html.contains("Plotly.newPlot"));
}

#[test]
fn test_day_of_week_over_full_table() {
    let table = read_transfers(fixture_path()).unwrap();

    // Mondays: Feb 10 total 30, Mar 3 total 26 -> median 28.
    let rows = median_by_day_of_week(&table);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].day_of_week, DayOfWeek::Mon);
    assert_eq!(rows[0].median_transfers, 28.0);
    assert_eq!(rows[1].day_of_week, DayOfWeek::Tue);
    assert_eq!(rows[1].median_transfers, 24.0);
    assert_eq!(rows[2].day_of_week, DayOfWeek::Sat);
    assert_eq!(rows[2].median_transfers, 19.0);
}

#[test]
fn test_month_comparison_against_baseline() {
    let table = read_transfers(fixture_path()).unwrap();

    let feb: MonthKey = "202502".parse().unwrap();
    let mar: MonthKey = "202503".parse().unwrap();
    let rows = compare_months(&table, &[mar, feb]);

    // February is the baseline: one date, total 30.
    assert_eq!(rows[0].month, feb);
    assert_eq!(rows[0].total_transfers, 30);
    assert_eq!(rows[0].daily_avg_transfers, Some(30.0));
    assert_eq!(rows[0].total_diff, None);

    // March: total 69 over 3 dates -> daily average 23.
    assert_eq!(rows[1].month, mar);
    assert_eq!(rows[1].total_transfers, 69);
    assert_eq!(rows[1].daily_avg_transfers, Some(23.0));
    assert_eq!(rows[1].total_diff, Some(39));
    assert_eq!(rows[1].total_pct_change, Some(130.0));
    assert_eq!(rows[1].daily_avg_diff, Some(-7.0));
    let pct = rows[1].daily_avg_pct_change.unwrap();
    assert!((pct - (-700.0 / 30.0)).abs() < 1e-9);
}

#[test]
fn test_normalize_matches_path_loader() {
    let text = std::fs::read_to_string(fixture_path()).unwrap();
    let reader = csv::Reader::from_reader(text.as_bytes());
    let from_reader = normalize(reader, Path::new("city_hall_transfers_24hh.csv")).unwrap();

    let from_path = read_transfers(fixture_path()).unwrap();
    assert_eq!(from_reader, from_path);
}
