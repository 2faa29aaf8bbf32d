use std::collections::BTreeSet;

use crate::{roster::Roster, types::Callsign};

/// Returns every member callsign present in `tokens`, ascending and unique.
///
/// Works on raw tokens rather than classified events; repeats collapse in
/// the set.
pub fn sorted_members<I, T>(roster: &Roster, tokens: I) -> Vec<Callsign>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    let members: BTreeSet<&str> = tokens
        .into_iter()
        .filter_map(|token| roster.get(token.as_ref()))
        .map(|member| member.callsign.as_str())
        .collect();
    members.into_iter().map(str::to_string).collect()
}
