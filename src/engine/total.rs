use crate::{
    checkin::{classifier::classify_with_scope, classifier::DuplicateScope, events::ClassifiedEvent},
    roster::Roster,
};

use super::traits::{fold, Aggregator};

/// Counts [`ClassifiedEvent::Member`] events and ignores the rest.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TotalCounter {
    total: usize,
}

impl Aggregator for TotalCounter {
    type Output = usize;

    fn observe(&mut self, event: &ClassifiedEvent) {
        if event.is_member() {
            self.total += 1;
        }
    }

    fn finish(self) -> usize {
        self.total
    }
}

/// Classifies `tokens` and returns the number of confirmed members.
pub fn total_checkins<I, T>(roster: &Roster, tokens: I, scope: DuplicateScope) -> usize
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    fold(TotalCounter::default(), classify_with_scope(roster, tokens, scope))
}
