//! Net-control and city-responsibility schedules.

/// Schedule file readers.
pub mod parse;
/// Month reconciliation and coverage checks.
pub mod reconcile;

use chrono::NaiveDate;

use crate::types::Callsign;

/// Net-control duty for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetControlRecord {
    /// Net date.
    pub date: NaiveDate,
    /// Station running the net; empty for an open slot.
    pub callsign: Callsign,
}

impl NetControlRecord {
    /// Returns true when a station has signed up.
    pub fn is_assigned(&self) -> bool {
        !self.callsign.is_empty()
    }
}

/// City responsible for the net on one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityRecord {
    /// Net date.
    pub date: NaiveDate,
    /// Responsible city.
    pub city: String,
}

/// City record joined with its net-control assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRecord {
    /// Net date.
    pub date: NaiveDate,
    /// Responsible city.
    pub city: String,
    /// Assigned station, if anyone signed up.
    pub callsign: Option<Callsign>,
}
