use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading and normalizing a raw transfer file.
///
/// Malformed data is always fatal for the file being loaded; medians are
/// sensitive to silently dropped rows, so the loader never clamps or skips.
#[derive(Error, Debug)]
pub enum LoadError {
    /// A required column is absent after applying all known header renames.
    #[error("{path}: missing required column `{column}`")]
    MissingColumn { path: PathBuf, column: &'static str },

    /// A field in a data row failed type coercion or a range check.
    #[error("{path}: row {row}: {message}")]
    InvalidValue {
        path: PathBuf,
        row: u64,
        message: String,
    },

    /// The file could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV layer rejected the file (ragged rows, bad quoting).
    #[error("{path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_display() {
        let err = LoadError::MissingColumn {
            path: PathBuf::from("data/city_hall_transfers_24hh.csv"),
            column: "num_transfers",
        };
        let msg = err.to_string();
        assert!(msg.contains("city_hall_transfers_24hh.csv"));
        assert!(msg.contains("`num_transfers`"));
    }

    #[test]
    fn test_invalid_value_display_names_row() {
        let err = LoadError::InvalidValue {
            path: PathBuf::from("data.csv"),
            row: 17,
            message: "hour 25 out of range 0-23".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("row 17"));
        assert!(msg.contains("hour 25"));
    }

    #[test]
    fn test_io_display_carries_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = LoadError::Io {
            path: PathBuf::from("/missing.csv"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("/missing.csv"));
        assert!(msg.contains("no such file"));
    }
}
