use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use chrono::NaiveDate;
use tracing::debug;

use crate::{
    error::{Error, Result},
    types::DATE_FORMAT,
};

use super::{CityRecord, NetControlRecord};

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::io(path, e))
}

/// Reads `date<TAB>callsign` rows. Blank lines are skipped; a row with an
/// empty callsign lists an open date.
pub fn parse_netcontrol_schedule(reader: impl BufRead, origin: &Path) -> Result<Vec<NetControlRecord>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(origin, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let Some((date, callsign)) = line.split_once('\t') else {
            return Err(Error::malformed(origin, idx + 1, line, "missing tab separator"));
        };
        let Some(date) = parse_date(date) else {
            return Err(Error::malformed(origin, idx + 1, line, "unparseable date"));
        };
        records.push(NetControlRecord {
            date,
            callsign: callsign.trim().to_uppercase(),
        });
    }
    Ok(records)
}

/// Reads `date<WS>city` rows, splitting on the first tab or space.
pub fn parse_city_schedule(reader: impl BufRead, origin: &Path) -> Result<Vec<CityRecord>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| Error::io(origin, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let Some((date, city)) = line.split_once(['\t', ' ']) else {
            return Err(Error::malformed(origin, idx + 1, line, "missing city"));
        };
        let Some(date) = parse_date(date) else {
            return Err(Error::malformed(origin, idx + 1, line, "unparseable date"));
        };
        records.push(CityRecord {
            date,
            city: city.trim().to_string(),
        });
    }
    Ok(records)
}

/// Loads the net-control schedule file.
pub fn load_netcontrol_schedule(path: &Path) -> Result<Vec<NetControlRecord>> {
    let records = parse_netcontrol_schedule(open(path)?, path)?;
    debug!(path = %path.display(), records = records.len(), "loaded net control schedule");
    Ok(records)
}

/// Loads the city-responsibility schedule file.
pub fn load_city_schedule(path: &Path) -> Result<Vec<CityRecord>> {
    let records = parse_city_schedule(open(path)?, path)?;
    debug!(path = %path.display(), records = records.len(), "loaded city schedule");
    Ok(records)
}
