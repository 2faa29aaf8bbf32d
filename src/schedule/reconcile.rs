use std::fmt::Write;

use chrono::{Datelike, NaiveDate};

use crate::types::{month_end, month_start, same_month, DISPLAY_DATE_FORMAT};

use super::{CityRecord, MergedRecord, NetControlRecord};

/// Merged city and net-control schedule for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSchedule {
    /// First day of the month.
    pub month: NaiveDate,
    /// True when every city date has a net control. Vacuously true for a
    /// month without city records.
    pub complete: bool,
    /// One record per city date in the month, in city-schedule order.
    pub records: Vec<MergedRecord>,
}

impl MonthSchedule {
    /// City dates nobody has signed up for.
    pub fn open_dates(&self) -> impl Iterator<Item = &MergedRecord> {
        self.records.iter().filter(|r| r.callsign.is_none())
    }

    /// `M/D/YYYY<TAB>city<TAB>callsign` rows, one per record.
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        for r in &self.records {
            let _ = writeln!(
                out,
                "{}\t{}\t{}",
                r.date.format(DISPLAY_DATE_FORMAT),
                r.city,
                r.callsign.as_deref().unwrap_or("")
            );
        }
        out
    }
}

/// Left-joins the city schedule onto the net-control schedule for the month
/// containing `month`.
///
/// When several net-control records share a date the last one wins; a
/// blank callsign leaves the date open.
pub fn reconcile(
    month: NaiveDate,
    net_control: &[NetControlRecord],
    cities: &[CityRecord],
) -> MonthSchedule {
    let assignments: Vec<&NetControlRecord> = net_control
        .iter()
        .filter(|nc| same_month(nc.date, month))
        .collect();

    let mut complete = true;
    let mut records = Vec::new();
    for city in cities.iter().filter(|c| same_month(c.date, month)) {
        let callsign = assignments
            .iter()
            .rev()
            .find(|nc| nc.date == city.date)
            .filter(|nc| nc.is_assigned())
            .map(|nc| nc.callsign.clone());
        if callsign.is_none() {
            complete = false;
        }
        records.push(MergedRecord {
            date: city.date,
            city: city.city.clone(),
            callsign,
        });
    }

    MonthSchedule {
        month: month_start(month),
        complete,
        records,
    }
}

/// Checks that the city schedule spans the whole month at the net's cadence.
///
/// Holds when the month has a city record within `cadence_days` of its
/// first day, one within `cadence_days` of its last day, and no gap between
/// consecutive dates longer than `cadence_days`.
pub fn city_schedule_covers(month: NaiveDate, cities: &[CityRecord], cadence_days: u32) -> bool {
    let cadence = i64::from(cadence_days.max(1));
    let mut dates: Vec<NaiveDate> = cities
        .iter()
        .filter(|c| same_month(c.date, month))
        .map(|c| c.date)
        .collect();
    dates.sort();
    dates.dedup();

    let (Some(first), Some(last)) = (dates.first(), dates.last()) else {
        return false;
    };
    if i64::from(first.day()) > cadence {
        return false;
    }
    if (month_end(month) - *last).num_days() >= cadence {
        return false;
    }
    dates
        .windows(2)
        .all(|pair| (pair[1] - pair[0]).num_days() <= cadence)
}

/// Net-control record for `date`, first non-blank match in file order.
pub fn assignment_on(date: NaiveDate, net_control: &[NetControlRecord]) -> Option<&NetControlRecord> {
    net_control
        .iter()
        .find(|nc| nc.date == date && nc.is_assigned())
}
