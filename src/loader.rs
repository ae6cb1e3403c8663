//! CSV loader and normalizer for raw interchange transfer files.
//!
//! Raw files come in two known generations: newer exports carry a
//! `day_type` column and integer hour values, older ones lack the day-type
//! column and use display hour labels such as `08:00`. Both normalize to
//! the same canonical [`TransferTable`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::debug;

use crate::error::LoadError;
use crate::table::{DayOfWeek, TransferRecord, TransferTable};

// Accepted raw header names per canonical column, first match wins.
const DATE_HEADERS: &[&str] = &["calendar_date", "date"];
const HOUR_HEADERS: &[&str] = &["time_display_hh24", "hour"];
const DAY_OF_WEEK_HEADERS: &[&str] = &["cal_day_in_week", "day_of_week"];
const NUM_TRANSFERS_HEADERS: &[&str] = &["journey_count", "num_transfers"];
const ORIGIN_HEADERS: &[&str] = &["origin_route"];
const DESTINATION_HEADERS: &[&str] = &["destination_route"];
const DAY_TYPE_HEADERS: &[&str] = &["day_type", "is_weekday"];

// Administrative columns dropped outright: the pandas-era unnamed index
// column and the calendar year already encoded by `date`.
const DROPPED_HEADERS: &[&str] = &["", "Unnamed: 0", "cal_year"];

/// Header positions of the canonical columns in one raw file.
struct ColumnMap {
    date: usize,
    hour: usize,
    day_of_week: usize,
    num_transfers: usize,
    origin_route: usize,
    destination_route: usize,
    /// Absent in older file generations.
    day_type: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord, path: &Path) -> Result<Self, LoadError> {
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.trim() == *n))
        };

        let require = |names: &'static [&'static str]| {
            find(names).ok_or_else(|| LoadError::MissingColumn {
                path: path.to_path_buf(),
                // canonical name is the last listed variant
                column: names[names.len() - 1],
            })
        };

        let map = ColumnMap {
            date: require(DATE_HEADERS)?,
            hour: require(HOUR_HEADERS)?,
            day_of_week: require(DAY_OF_WEEK_HEADERS)?,
            num_transfers: require(NUM_TRANSFERS_HEADERS)?,
            origin_route: require(ORIGIN_HEADERS)?,
            destination_route: require(DESTINATION_HEADERS)?,
            day_type: find(DAY_TYPE_HEADERS),
        };

        let known = |h: &str| {
            [
                DATE_HEADERS,
                HOUR_HEADERS,
                DAY_OF_WEEK_HEADERS,
                NUM_TRANSFERS_HEADERS,
                ORIGIN_HEADERS,
                DESTINATION_HEADERS,
                DAY_TYPE_HEADERS,
                DROPPED_HEADERS,
            ]
            .iter()
            .any(|names| names.iter().any(|n| h == *n))
        };
        let unknown: Vec<&str> = headers
            .iter()
            .map(str::trim)
            .filter(|&h| !known(h))
            .collect();
        if !unknown.is_empty() {
            debug!(path = %path.display(), columns = ?unknown, "Ignoring unrecognised columns");
        }

        Ok(map)
    }
}

/// Reads and normalizes one raw transfer CSV file.
pub fn read_transfers(path: impl AsRef<Path>) -> Result<TransferTable, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    normalize(csv::Reader::from_reader(file), path)
}

/// Normalizes an already-open raw table into a canonical [`TransferTable`].
///
/// `path` identifies the source in error messages only; no further I/O
/// happens beyond draining the reader.
///
/// # Errors
///
/// Fails on a missing required column, an unparseable date/hour/count, a
/// negative count, or an out-of-range hour, naming the offending row.
/// Malformed rows are never dropped or clamped.
pub fn normalize<R: Read>(
    mut reader: csv::Reader<R>,
    path: &Path,
) -> Result<TransferTable, LoadError> {
    let headers = reader
        .headers()
        .map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();
    let columns = ColumnMap::resolve(&headers, path)?;

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let row_number = i as u64 + 1;
        rows.push(parse_row(&record, &columns, path, row_number)?);
    }

    debug!(path = %path.display(), rows = rows.len(), "Normalized transfer table");
    Ok(TransferTable::new(rows))
}

fn parse_row(
    record: &StringRecord,
    columns: &ColumnMap,
    path: &Path,
    row: u64,
) -> Result<TransferRecord, LoadError> {
    let invalid = |message: String| LoadError::InvalidValue {
        path: path.to_path_buf(),
        row,
        message,
    };
    let field = |idx: usize| record.get(idx).unwrap_or("").trim();

    let date_text = field(columns.date);
    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
        .map_err(|_| invalid(format!("unparseable date `{date_text}`")))?;

    let hour = parse_hour(field(columns.hour)).map_err(&invalid)?;

    let day_of_week: DayOfWeek = field(columns.day_of_week)
        .parse()
        .map_err(|e| invalid(format!("{e}")))?;

    let num_transfers = parse_count(field(columns.num_transfers)).map_err(&invalid)?;

    // True iff the day type reads "weekday", case-insensitively; anything
    // else ("Weekend", unexpected strings) is a non-weekday.
    let is_weekday = columns
        .day_type
        .map(|idx| field(idx).eq_ignore_ascii_case("weekday"));

    Ok(TransferRecord {
        date,
        hour,
        day_of_week,
        is_weekday,
        origin_route: field(columns.origin_route).to_string(),
        destination_route: field(columns.destination_route).to_string(),
        num_transfers,
    })
}

/// Parses an hour-of-day from either an integer (`8`, `08`) or an `HH:MM`
/// display label (`08:00`), as found in older file generations.
fn parse_hour(text: &str) -> Result<u8, String> {
    let digits = text.split(':').next().unwrap_or(text).trim();
    let hour: u8 = digits
        .parse()
        .map_err(|_| format!("unparseable hour `{text}`"))?;
    if hour > 23 {
        return Err(format!("hour {hour} out of range 0-23"));
    }
    Ok(hour)
}

fn parse_count(text: &str) -> Result<u64, String> {
    let count: i64 = text
        .parse()
        .map_err(|_| format!("unparseable transfer count `{text}`"))?;
    u64::try_from(count).map_err(|_| format!("negative transfer count {count}"))
}
