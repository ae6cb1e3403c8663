//! Canonical data model for interchange transfer records.
//!
//! The loader produces a [`TransferTable`] from raw CSV; every aggregation
//! function consumes one. Tables are immutable once built.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Day of the week, ordered Mon..Sun for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DayOfWeek {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl DayOfWeek {
    /// All days in fixed week order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];

    /// Three-letter display code.
    pub fn code(&self) -> &'static str {
        match self {
            DayOfWeek::Mon => "Mon",
            DayOfWeek::Tue => "Tue",
            DayOfWeek::Wed => "Wed",
            DayOfWeek::Thu => "Thu",
            DayOfWeek::Fri => "Fri",
            DayOfWeek::Sat => "Sat",
            DayOfWeek::Sun => "Sun",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Error, Debug)]
#[error("unrecognised day of week `{0}`")]
pub struct ParseDayOfWeekError(String);

impl FromStr for DayOfWeek {
    type Err = ParseDayOfWeekError;

    /// Accepts three-letter codes and full English names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mon" | "monday" => Ok(DayOfWeek::Mon),
            "tue" | "tuesday" => Ok(DayOfWeek::Tue),
            "wed" | "wednesday" => Ok(DayOfWeek::Wed),
            "thu" | "thursday" => Ok(DayOfWeek::Thu),
            "fri" | "friday" => Ok(DayOfWeek::Fri),
            "sat" | "saturday" => Ok(DayOfWeek::Sat),
            "sun" | "sunday" => Ok(DayOfWeek::Sun),
            _ => Err(ParseDayOfWeekError(s.to_string())),
        }
    }
}

/// A calendar month identified as `YYYYMM`, e.g. `202503`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// True iff the date falls inside this calendar month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Month key the given date falls in.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Error, Debug)]
#[error("invalid month key `{0}`: expected YYYYMM")]
pub struct ParseMonthKeyError(String);

impl FromStr for MonthKey {
    type Err = ParseMonthKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseMonthKeyError(s.to_string()));
        }
        let year: i32 = s[..4].parse().map_err(|_| ParseMonthKeyError(s.to_string()))?;
        let month: u32 = s[4..].parse().map_err(|_| ParseMonthKeyError(s.to_string()))?;
        MonthKey::new(year, month).ok_or_else(|| ParseMonthKeyError(s.to_string()))
    }
}

/// One normalized row: transfers between a route pair at an interchange
/// during a single hour of a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferRecord {
    pub date: NaiveDate,
    pub hour: u8,
    pub day_of_week: DayOfWeek,
    /// None when the source file generation carries no day-type column.
    pub is_weekday: Option<bool>,
    pub origin_route: String,
    pub destination_route: String,
    pub num_transfers: u64,
}

/// Ordered collection of normalized transfer records.
///
/// Multiple rows may share a (date, hour) pair; aggregations sum across
/// route pairs before taking medians.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferTable {
    rows: Vec<TransferRecord>,
}

impl TransferTable {
    pub fn new(rows: Vec<TransferRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[TransferRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose date falls within `[start, end]`, inclusive on both ends.
    pub fn filter_date_range(&self, start: NaiveDate, end: NaiveDate) -> TransferTable {
        TransferTable {
            rows: self
                .rows
                .iter()
                .filter(|r| r.date >= start && r.date <= end)
                .cloned()
                .collect(),
        }
    }
}

impl FromIterator<TransferRecord> for TransferTable {
    fn from_iter<I: IntoIterator<Item = TransferRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
