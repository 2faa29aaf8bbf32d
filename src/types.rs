//! Shared primitive types: callsigns, roster members and month prefixes.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Upper-cased station callsign.
pub type Callsign = String;

/// Date format used by every schedule file and outbound table.
pub const DATE_FORMAT: &str = "%m/%d/%Y";
/// Date format used when rendering dates for humans (`3/1/2024`).
pub const DISPLAY_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Club member loaded from the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Full name.
    pub name: String,
    /// Station callsign; the member's identity.
    pub callsign: Callsign,
    /// Contact address, possibly empty.
    pub email: String,
}

impl Member {
    /// Builds a member, upper-casing the callsign.
    pub fn new(name: impl Into<String>, callsign: &str, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            callsign: callsign.trim().to_uppercase(),
            email: email.into(),
        }
    }
}

/// Validated file-name prefix selecting a year (`2024`) or a month (`2024-03`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonthPrefix(String);

impl MonthPrefix {
    /// Accepts four digits, or four digits, any separator and two digits.
    pub fn parse(raw: &str) -> Result<Self> {
        let bytes = raw.as_bytes();
        let digits = |range: std::ops::Range<usize>| bytes[range].iter().all(u8::is_ascii_digit);
        let ok = match bytes.len() {
            4 => digits(0..4),
            7 => digits(0..4) && digits(5..7),
            _ => false,
        };
        if ok {
            Ok(Self(raw.to_string()))
        } else {
            Err(Error::InvalidMonthPrefix(raw.to_string()))
        }
    }

    /// Prefix for the month containing `date`, e.g. `2024-03`.
    pub fn for_month(date: NaiveDate) -> Self {
        Self(format!("{}-{:02}", date.year(), date.month()))
    }

    /// Raw prefix text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MonthPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// True when both dates fall in the same calendar month.
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let next = next_month_start(date);
    next.pred_opt().unwrap_or(date)
}

/// First day of the month after the one containing `date`.
pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    start
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(start)
}

/// First day of the month before the one containing `date`.
pub fn previous_month_start(date: NaiveDate) -> NaiveDate {
    let start = month_start(date);
    start
        .checked_sub_months(chrono::Months::new(1))
        .unwrap_or(start)
}

/// Adds whole days, saturating at the calendar limit.
pub fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}
