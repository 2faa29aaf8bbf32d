//! Crate-wide error type.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::types::Callsign;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by the file adapters, the schedule logic and the notifier.
///
/// Classification and aggregation never fail; anything they do not
/// recognise is reported as an unknown check-in instead.
#[derive(Error, Debug)]
pub enum Error {
    /// File could not be opened, read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Roster CSV could not be decoded.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// Roster file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },

    /// A line of an input file did not have the expected shape.
    #[error("malformed record in {path} line {line} ({reason}): {content:?}")]
    MalformedRecord {
        /// File being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Offending line.
        content: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Configuration could not be located or is inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file is not valid YAML for the expected shape.
    #[error("failed to parse config {path}: {source}")]
    Yaml {
        /// Config file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_yaml::Error,
    },

    /// Scheduled net control has no contact address in the roster.
    #[error("net control {0} has empty email")]
    EmptyEmail(Callsign),

    /// Nobody is scheduled for net control on this date.
    #[error("no net control assigned for {0}")]
    UnassignedDate(NaiveDate),

    /// Callsign is not in the roster.
    #[error("unknown callsign: {0}")]
    UnknownCallsign(Callsign),

    /// More than one hospital net log matched a single month.
    #[error("more than one hospital net log for {month_prefix}: {files:?}")]
    DuplicateHospitalLog {
        /// Prefix that was searched.
        month_prefix: String,
        /// Every matching file, in processing order.
        files: Vec<PathBuf>,
    },

    /// Month prefix is neither `YYYY` nor `YYYY-MM`.
    #[error("month prefix is invalid: {0:?}")]
    InvalidMonthPrefix(String),

    /// City responsibility schedule leaves part of the month uncovered.
    #[error("city responsibility schedule for {month} is incomplete")]
    IncompleteCitySchedule {
        /// Any date in the month checked.
        month: NaiveDate,
    },

    /// Background task of the check-in pipeline failed.
    #[error("pipeline error: {0}")]
    Pipeline(String),
}

impl Error {
    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Builds a [`Error::MalformedRecord`].
    pub fn malformed(
        path: impl Into<PathBuf>,
        line: usize,
        content: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            path: path.into(),
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }
}
