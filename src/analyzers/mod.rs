//! Aggregations over canonical transfer tables.
//!
//! All functions here are pure: they take an already-loaded (and, where the
//! caller cares, already date-filtered) [`crate::table::TransferTable`] and
//! derive summary tables. Groups with no data are omitted or carry `None`,
//! never errors.

pub mod median;
pub mod monthly;
pub mod types;
pub mod utility;
