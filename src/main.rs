//! CLI entry point for the transfer statistics tool.
//!
//! Provides subcommands for summarizing a single interchange file (median
//! transfers by hour or day of week, month-over-month comparison) and a
//! batch report mode that charts every interchange file in a directory.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use transfer_stats::{
    analyzers::median::{median_by_day_of_week, median_by_hour},
    analyzers::monthly::{compare_months, split_by_month},
    chart::BarChart,
    loader::read_transfers,
    table::{MonthKey, TransferTable},
};

#[derive(Parser)]
#[command(name = "transfer_stats")]
#[command(about = "Median transfer statistics for transit interchanges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Median transfers by hour of day for one interchange file
    Hourly {
        /// Path to a raw transfer CSV
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Only include dates on or after this day (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Only include dates on or before this day (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Write an HTML chart here instead of printing JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Median transfers by day of week for one interchange file
    DayOfWeek {
        #[arg(value_name = "FILE")]
        source: PathBuf,

        #[arg(long)]
        start: Option<NaiveDate>,

        #[arg(long)]
        end: Option<NaiveDate>,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Month-over-month comparison of totals and daily averages
    Compare {
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Months to compare (YYYYMM), earliest becomes the baseline
        #[arg(long, num_args = 2, required = true, value_name = "YYYYMM")]
        months: Vec<MonthKey>,

        #[arg(long)]
        title: Option<String>,

        /// Write an HTML chart of monthly totals instead of printing JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Chart every `*_transfers_24hh.csv` in a directory for one month
    Report {
        /// Directory of collected interchange files
        #[arg(value_name = "DIR")]
        data_dir: PathBuf,

        /// Reporting month (YYYYMM)
        #[arg(long, value_name = "YYYYMM")]
        month: MonthKey,

        /// Directory to write HTML charts to
        #[arg(short, long, default_value = "outputs")]
        output_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/transfer_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("transfer_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Hourly {
            source,
            start,
            end,
            title,
            output,
        } => {
            let table = load_range(&source, start, end)?;
            let rows = median_by_hour(&table);
            let title = title.unwrap_or_else(|| "Median hourly #transfers".to_string());
            emit(&rows, &BarChart::from_hourly(&rows, &title), output.as_deref())?;
        }
        Commands::DayOfWeek {
            source,
            start,
            end,
            title,
            output,
        } => {
            let table = load_range(&source, start, end)?;
            let rows = median_by_day_of_week(&table);
            let title = title.unwrap_or_else(|| "Median #transfers by day of week".to_string());
            emit(
                &rows,
                &BarChart::from_day_of_week(&rows, &title),
                output.as_deref(),
            )?;
        }
        Commands::Compare {
            source,
            months,
            title,
            output,
        } => {
            let table = read_transfers(&source)?;
            let rows = compare_months(&table, &months);
            let title = title.unwrap_or_else(|| "Monthly total #transfers".to_string());
            emit(
                &rows,
                &BarChart::from_comparison(&rows, &title),
                output.as_deref(),
            )?;
        }
        Commands::Report {
            data_dir,
            month,
            output_dir,
        } => {
            report(&data_dir, month, &output_dir)?;
        }
    }

    Ok(())
}

/// Loads one raw file, optionally restricted to an inclusive date range.
fn load_range(
    source: &Path,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<TransferTable> {
    let table = read_transfers(source)?;
    Ok(match (start, end) {
        (None, None) => table,
        (start, end) => table.filter_date_range(
            start.unwrap_or(NaiveDate::MIN),
            end.unwrap_or(NaiveDate::MAX),
        ),
    })
}

/// Writes an HTML chart when an output path is given, otherwise prints the
/// aggregate rows as pretty JSON to stdout.
fn emit<T: Serialize>(rows: &[T], chart: &BarChart, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => chart.write_html(path)?,
        None => println!("{}", serde_json::to_string_pretty(rows)?),
    }
    Ok(())
}

/// Charts every interchange file in `data_dir` for the given month.
///
/// A failure in one file aborts only that file: the error is logged and the
/// remaining interchanges are still processed.
fn report(data_dir: &Path, month: MonthKey, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let mut written = 0;
    let mut skipped = 0;

    for entry in fs::read_dir(data_dir)? {
        let path = entry?.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if path.extension().and_then(|e| e.to_str()) != Some("csv")
            || !stem.ends_with("_transfers_24hh")
        {
            continue;
        }

        let label = interchange_label(stem);
        let title = format!(
            "{label} : Median hourly #transfers : {}",
            month_title(month)
        );

        match chart_interchange(&path, month, &label, &title, output_dir) {
            Ok(()) => written += 1,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Skipping interchange file");
                skipped += 1;
            }
        }
    }

    info!(written, skipped, output_dir = %output_dir.display(), "Report complete");
    Ok(())
}

fn chart_interchange(
    path: &Path,
    month: MonthKey,
    label: &str,
    title: &str,
    output_dir: &Path,
) -> Result<()> {
    let table = read_transfers(path)?;
    let mut subsets = split_by_month(&table, &[month]);
    let subset = subsets.remove(&month).unwrap_or_default();

    let rows = median_by_hour(&subset);
    let output = output_dir.join(format!("{label}.html"));
    BarChart::from_hourly(&rows, title).write_html(&output)?;
    Ok(())
}

/// `city_hall_transfers_24hh` -> `City Hall`.
fn interchange_label(stem: &str) -> String {
    let base = stem.strip_suffix("_transfers_24hh").unwrap_or(stem);
    base.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `202503` -> `March 2025`, for chart titles.
fn month_title(month: MonthKey) -> String {
    let name = match month.month() {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    };
    format!("{name} {}", month.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interchange_label_from_stem() {
        assert_eq!(interchange_label("city_hall_transfers_24hh"), "City Hall");
        assert_eq!(
            interchange_label("north_quay_transfers_24hh"),
            "North Quay"
        );
        assert_eq!(interchange_label("airport"), "Airport");
    }

    #[test]
    fn test_month_title() {
        let month: MonthKey = "202503".parse().unwrap();
        assert_eq!(month_title(month), "March 2025");
    }
}
