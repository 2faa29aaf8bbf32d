//! Check-in log reading and classification.

/// Per-token classification and session state.
pub mod classifier;
/// Classified event sum type.
pub mod events;
/// Line-oriented check-in log reader.
pub mod source;
