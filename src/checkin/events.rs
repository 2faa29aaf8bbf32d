//! Classified check-in events.

use crate::types::Callsign;

/// One classified log entry. Exactly one is produced per input token, plus a
/// trailing [`ClassifiedEvent::SectionBoundary`] once the log is exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassifiedEvent {
    /// Member already confirmed earlier in the current scope.
    Duplicate(Callsign),
    /// First confirmed check-in of a member.
    Member(Callsign),
    /// Blank line, or the end of the log.
    SectionBoundary,
    /// Callsign not on the roster.
    Unknown(Callsign),
}

impl ClassifiedEvent {
    /// Callsign carried by the event, if any.
    pub fn callsign(&self) -> Option<&str> {
        match self {
            Self::Duplicate(c) | Self::Member(c) | Self::Unknown(c) => Some(c),
            Self::SectionBoundary => None,
        }
    }

    /// Returns true for a confirmed member check-in.
    pub fn is_member(&self) -> bool {
        matches!(self, Self::Member(_))
    }
}
