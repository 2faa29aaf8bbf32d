//! Check-in classifier.
//!
//! Turns the token stream of one log into [`ClassifiedEvent`]s against a
//! [`Roster`]. Output order matches input order; one event is produced per
//! token and one extra [`ClassifiedEvent::SectionBoundary`] closes the log.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::{roster::Roster, types::Callsign};

use super::events::ClassifiedEvent;

/// How far back a repeated callsign counts as a duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateScope {
    /// Duplicate of any earlier check-in in the log.
    #[default]
    Session,
    /// Duplicate only within the current section; boundaries reset it.
    Section,
}

/// Running state of one classification run.
#[derive(Debug, Default)]
pub struct ClassifierState {
    scope: DuplicateScope,
    confirmed: HashSet<Callsign>,
}

impl ClassifierState {
    /// Fresh state for a new log.
    pub fn new(scope: DuplicateScope) -> Self {
        Self {
            scope,
            confirmed: HashSet::new(),
        }
    }

    /// Classifies one normalized token.
    pub fn classify_token(&mut self, roster: &Roster, token: &str) -> ClassifiedEvent {
        if token.is_empty() {
            if self.scope == DuplicateScope::Section {
                self.confirmed.clear();
            }
            return ClassifiedEvent::SectionBoundary;
        }
        if !roster.contains(token) {
            return ClassifiedEvent::Unknown(token.to_string());
        }
        if self.confirmed.contains(token) {
            return ClassifiedEvent::Duplicate(token.to_string());
        }
        self.confirmed.insert(token.to_string());
        ClassifiedEvent::Member(token.to_string())
    }

    /// Event closing the log once the input is exhausted.
    pub fn finish(&mut self) -> ClassifiedEvent {
        if self.scope == DuplicateScope::Section {
            self.confirmed.clear();
        }
        ClassifiedEvent::SectionBoundary
    }

    /// Number of distinct members confirmed in the current scope.
    pub fn confirmed_len(&self) -> usize {
        self.confirmed.len()
    }
}

/// Lazy classifier over a token iterator.
pub struct Classifier<'r, I> {
    roster: &'r Roster,
    tokens: I,
    state: ClassifierState,
    closed: bool,
}

impl<'r, I, T> Classifier<'r, I>
where
    I: Iterator<Item = T>,
    T: AsRef<str>,
{
    /// Wraps `tokens` with the given duplicate scope.
    pub fn new(roster: &'r Roster, tokens: I, scope: DuplicateScope) -> Self {
        Self {
            roster,
            tokens,
            state: ClassifierState::new(scope),
            closed: false,
        }
    }
}

impl<I, T> Iterator for Classifier<'_, I>
where
    I: Iterator<Item = T>,
    T: AsRef<str>,
{
    type Item = ClassifiedEvent;

    fn next(&mut self) -> Option<ClassifiedEvent> {
        if self.closed {
            return None;
        }
        match self.tokens.next() {
            Some(token) => Some(self.state.classify_token(self.roster, token.as_ref())),
            None => {
                self.closed = true;
                Some(self.state.finish())
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.closed {
            return (0, Some(0));
        }
        let (lo, hi) = self.tokens.size_hint();
        (lo.saturating_add(1), hi.and_then(|h| h.checked_add(1)))
    }
}

/// Classifies `tokens` with session-wide duplicate detection.
pub fn classify<I, T>(roster: &Roster, tokens: I) -> Classifier<'_, I::IntoIter>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    Classifier::new(roster, tokens.into_iter(), DuplicateScope::Session)
}

/// Classifies `tokens` with an explicit duplicate scope.
pub fn classify_with_scope<I, T>(
    roster: &Roster,
    tokens: I,
    scope: DuplicateScope,
) -> Classifier<'_, I::IntoIter>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    Classifier::new(roster, tokens.into_iter(), scope)
}
