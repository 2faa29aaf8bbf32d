//! Folds over classified check-in events.

/// Sorted unique member lister.
pub mod sorted;
/// Printable per-section tally.
pub mod tally;
/// Confirmed-member counter.
pub mod total;
/// Aggregator trait and the fold driver.
pub mod traits;
