//! Optional pipelined classification on tokio tasks.

/// Reader and classifier stages joined by bounded channels.
pub mod pipeline;
