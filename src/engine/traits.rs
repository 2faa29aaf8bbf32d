use crate::checkin::events::ClassifiedEvent;

/// Consumer of a classified event stream.
///
/// Implementations are total: every event sequence, including the empty
/// one, yields an output.
pub trait Aggregator {
    /// Result produced once the stream ends.
    type Output;

    /// Consumes one event.
    fn observe(&mut self, event: &ClassifiedEvent);
    /// Ends the stream.
    fn finish(self) -> Self::Output;
}

/// Feeds every event to `aggregator` in order and returns its output.
pub fn fold<A, I>(mut aggregator: A, events: I) -> A::Output
where
    A: Aggregator,
    I: IntoIterator<Item = ClassifiedEvent>,
{
    for event in events {
        aggregator.observe(&event);
    }
    aggregator.finish()
}
