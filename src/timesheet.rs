//! Volunteer time-sheets derived from daily check-in logs.
//!
//! Every log whose file name starts with a month prefix is classified on its
//! own and its confirmed-member count is converted into billed hours.

use std::{
    fmt::Write,
    path::{Path, PathBuf},
};

use tracing::{debug, trace};

use crate::{
    checkin::{classifier::DuplicateScope, source::read_tokens},
    engine::total::total_checkins,
    error::{Error, Result},
    roster::Roster,
    types::MonthPrefix,
};

/// Fixed per-net setup duty, in hours.
pub const NET_SETUP_HOURS: f64 = 0.5;
/// Fixed per-net wrap-up duty, in hours.
pub const NET_WRAPUP_HOURS: f64 = 0.25;
/// Net check-ins handled per billed hour.
pub const NET_CHECKINS_PER_HOUR: f64 = 3.0;
/// Billed hours per hospital-net check-in.
pub const HOSPITAL_HOURS_PER_CHECKIN: f64 = 0.5;
/// Fixed hospital-net overhead, in hours.
pub const HOSPITAL_FIXED_HOURS: f64 = 0.25;

/// Hours billed for a weekly net with `checkins` confirmed members.
pub fn net_hours(checkins: usize) -> f64 {
    checkins as f64 / NET_CHECKINS_PER_HOUR + NET_SETUP_HOURS + NET_WRAPUP_HOURS
}

/// Hours billed for a hospital net with `checkins` confirmed members.
pub fn hospital_hours(checkins: usize) -> f64 {
    checkins as f64 * HOSPITAL_HOURS_PER_CHECKIN + HOSPITAL_FIXED_HOURS
}

/// One log file's contribution to a time-sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSheetLine {
    /// Log file name without directory.
    pub file_name: String,
    /// Confirmed members in the log.
    pub checkins: usize,
    /// Hours billed for the log, fixed duties included.
    pub hours: f64,
}

/// Net time-sheet for a month (or year) prefix.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSheet {
    /// Per-file lines in file-name order.
    pub lines: Vec<TimeSheetLine>,
    /// Sum of every line's hours.
    pub total_hours: f64,
}

impl TimeSheet {
    /// Tab-separated report: file, count, hours, setup, wrap-up, line total.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            let _ = writeln!(
                out,
                "{}:\t{}\t{:.3}\t{:.3}\t{:.3}\t{:.3}",
                line.file_name, line.checkins, line.hours, NET_SETUP_HOURS, NET_WRAPUP_HOURS, line.hours
            );
        }
        let _ = writeln!(out, "Total hours: {:.3}", self.total_hours);
        out
    }
}

/// Files in `dir` whose names start with `prefix`, sorted by name.
pub fn matching_logs(dir: &Path, prefix: &MonthPrefix) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }
        if entry
            .file_name()
            .to_string_lossy()
            .starts_with(prefix.as_str())
        {
            out.push(entry.path());
        }
    }
    out.sort();
    Ok(out)
}

fn count_log(roster: &Roster, path: &Path, scope: DuplicateScope) -> Result<usize> {
    trace!(path = %path.display(), "counting log");
    let tokens = read_tokens(path)?;
    Ok(total_checkins(roster, &tokens, scope))
}

/// Builds the net time-sheet for every log in `dir` matching `prefix`.
///
/// Any directory or read failure aborts the whole sheet.
pub fn net_time_sheet(
    roster: &Roster,
    dir: &Path,
    prefix: &MonthPrefix,
    scope: DuplicateScope,
) -> Result<TimeSheet> {
    let mut sheet = TimeSheet::default();
    for path in matching_logs(dir, prefix)? {
        let checkins = count_log(roster, &path, scope)?;
        let hours = net_hours(checkins);
        debug!(path = %path.display(), checkins, hours, "net log");
        sheet.total_hours += hours;
        sheet.lines.push(TimeSheetLine {
            file_name: file_name(&path),
            checkins,
            hours,
        });
    }
    Ok(sheet)
}

/// Hospital-net hours for `prefix`; at most one log may match.
///
/// No matching log bills zero hours.
pub fn hospital_net_hours(
    roster: &Roster,
    dir: &Path,
    prefix: &MonthPrefix,
    scope: DuplicateScope,
) -> Result<f64> {
    let Some(path) = single_hospital_log(dir, prefix)? else {
        debug!(prefix = %prefix, "no hospital net log");
        return Ok(0.0);
    };
    let checkins = count_log(roster, &path, scope)?;
    let hours = hospital_hours(checkins);
    debug!(path = %path.display(), checkins, hours, "hospital log");
    Ok(hours)
}

/// The hospital log for `prefix`, or an error when more than one matches.
pub fn single_hospital_log(dir: &Path, prefix: &MonthPrefix) -> Result<Option<PathBuf>> {
    let mut files = matching_logs(dir, prefix)?;
    if files.len() > 1 {
        return Err(Error::DuplicateHospitalLog {
            month_prefix: prefix.to_string(),
            files,
        });
    }
    Ok(files.pop())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
