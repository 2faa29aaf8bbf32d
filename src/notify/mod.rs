//! Outbound announcements: message model, composers, dispatch policy and
//! the spool-directory notifier.

/// Message bodies for each announcement.
pub mod announce;
/// Message type and the notifier seam.
pub mod message;
/// Calendar rules deciding what to send on a given day.
pub mod policy;
/// Notifier writing messages to a spool directory.
pub mod spool;
