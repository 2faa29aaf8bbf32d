//! Hospital net: the participating hospitals and the monthly assignment log.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::{
    checkin::source::normalize,
    error::{Error, Result},
    roster::Roster,
    timesheet::single_hospital_log,
    types::{Member, MonthPrefix},
};

/// A hospital on the net.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hospital {
    /// Name used in announcements.
    pub full_name: &'static str,
    /// Short code used in assignment logs.
    pub acronym: &'static str,
}

/// Hospitals served by the net, in announcement order.
pub const HOSPITALS: [Hospital; 5] = [
    Hospital { full_name: "Good Samaritan Hospital", acronym: "GSH" },
    Hospital { full_name: "O'Connor Hospital", acronym: "OCH" },
    Hospital { full_name: "Regional San Jose Hospital", acronym: "RSJ" },
    Hospital { full_name: "Valley Medical Center", acronym: "VMC" },
    Hospital { full_name: "Kaiser San Jose Medical Center", acronym: "KSJ" },
];

/// Acronym of the hospital acting as net control.
pub const NET_CONTROL_HOSPITAL: &str = "RSJ";

/// Station signed up for each hospital, keyed by acronym.
pub type HospitalAssignments = HashMap<String, Member>;

/// Parses `ACRONYM CALLSIGN` rows. Blank lines are skipped.
pub fn parse_assignments(reader: impl BufRead, origin: &Path, roster: &Roster) -> Result<HospitalAssignments> {
    let mut out = HospitalAssignments::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(origin, e))?;
        trace!(line = %line, "read hospital line");
        let normalized = normalize(&line);
        if normalized.is_empty() {
            continue;
        }
        let fields: Vec<&str> = normalized.split(' ').collect();
        let [acronym, callsign] = fields.as_slice() else {
            return Err(Error::malformed(origin, idx + 1, line, "expected `HOSPITAL CALLSIGN`"));
        };
        let member = roster
            .get(callsign)
            .ok_or_else(|| Error::UnknownCallsign(callsign.to_string()))?;
        out.insert(acronym.to_string(), member.clone());
    }
    Ok(out)
}

/// Reads the assignment log at `path`.
pub fn read_assignments(path: &Path, roster: &Roster) -> Result<HospitalAssignments> {
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    parse_assignments(BufReader::new(file), path, roster)
}

/// Assignments for the month `prefix` in `dir`; empty when no log exists.
pub fn month_assignments(dir: &Path, prefix: &MonthPrefix, roster: &Roster) -> Result<HospitalAssignments> {
    match single_hospital_log(dir, prefix)? {
        Some(path) => {
            debug!(path = %path.display(), "reading hospital assignments");
            read_assignments(&path, roster)
        }
        None => Ok(HospitalAssignments::new()),
    }
}

/// Signup table: each hospital padded to a common column, then the
/// assigned callsign or `Available!`.
pub fn signup_table(assignments: &HospitalAssignments) -> String {
    let width = HOSPITALS.iter().map(|h| h.full_name.len()).max().unwrap_or(0) + 10;
    let mut out = String::new();
    for h in &HOSPITALS {
        let who = assignments
            .get(h.acronym)
            .map(|m| m.callsign.as_str())
            .unwrap_or("Available!");
        out.push_str(&format!("{:<width$}{}\n", h.full_name, who));
    }
    out
}
