//! Club roster: an immutable callsign to member lookup loaded from the
//! contact-list CSV export.

use std::io::Read;
use std::path::Path;

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    types::{Callsign, Member},
};

/// 0-based CSV column holding the member's name.
pub const NAME_FIELD: usize = 1;
/// 0-based CSV column holding the callsign.
pub const CALLSIGN_FIELD: usize = 2;
/// 0-based CSV column holding the email address.
pub const EMAIL_FIELD: usize = 7;

/// Read-only set of known members keyed by callsign.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    members: HashMap<Callsign, Member>,
}

impl Roster {
    /// Builds a roster from members; later entries replace earlier ones
    /// with the same callsign.
    pub fn from_members(members: impl IntoIterator<Item = Member>) -> Self {
        let members = members
            .into_iter()
            .map(|m| (m.callsign.clone(), m))
            .collect();
        Self { members }
    }

    /// Loads the roster CSV at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|e| Error::io(path, e))?;
        let roster = Self::from_reader(file, path)?;
        debug!(path = %path.display(), members = roster.len(), "loaded roster");
        Ok(roster)
    }

    /// Parses roster CSV from any reader; `origin` names the source in errors.
    ///
    /// Rows with an empty callsign are skipped. Rows too short to hold an
    /// email column are malformed.
    pub fn from_reader(reader: impl Read, origin: &Path) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut members = HashMap::new();
        for row in csv.records() {
            let row = row.map_err(|source| Error::Csv {
                path: origin.to_path_buf(),
                source,
            })?;
            let line = row.position().map(|p| p.line() as usize).unwrap_or(0);
            if row.len() <= EMAIL_FIELD {
                return Err(Error::malformed(
                    origin,
                    line,
                    row.iter().collect::<Vec<_>>().join(","),
                    format!("expected at least {} fields, found {}", EMAIL_FIELD + 1, row.len()),
                ));
            }

            let callsign = row[CALLSIGN_FIELD].trim();
            if callsign.is_empty() {
                trace!(line, "skipping roster row without callsign");
                continue;
            }
            let member = Member::new(row[NAME_FIELD].trim(), callsign, row[EMAIL_FIELD].trim());
            members.insert(member.callsign.clone(), member);
        }
        Ok(Self { members })
    }

    /// Looks up a member by normalized callsign.
    pub fn get(&self, callsign: &str) -> Option<&Member> {
        self.members.get(callsign)
    }

    /// Returns true when the callsign belongs to a member.
    pub fn contains(&self, callsign: &str) -> bool {
        self.members.contains_key(callsign)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true for an empty roster.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
