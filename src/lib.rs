//! Check-in accounting and duty scheduling for a club's weekly radio net.
//!
//! A net log is a list of spoken callsigns, one per line, with blank lines
//! between waves. [`checkin::classifier`] tags each line against the
//! [`roster::Roster`]; the folds in [`engine`] turn the tagged stream into a
//! printable tally, a member count or a sorted member list, and
//! [`timesheet`] bills hours from the counts. Separately,
//! [`schedule::reconcile`] merges the net-control and city schedules for a
//! month and reports open dates, which [`notify::policy`] announces.
//!
//! # Examples
//!
//! ```
//! use netmgr::{
//!     checkin::{classifier::classify, events::ClassifiedEvent},
//!     engine::{tally::TallyReporter, traits::fold},
//!     roster::Roster,
//!     types::Member,
//! };
//!
//! let roster = Roster::from_members([
//!     Member::new("Herman", "K4LXF", "herman@example.org"),
//!     Member::new("Lily", "W6LIL", "lily@example.org"),
//! ]);
//! let tokens = ["K4LXF", "W6LIL", "", "K4LXF", "N0PE"];
//!
//! let events: Vec<_> = classify(&roster, tokens).collect();
//! assert_eq!(events.len(), tokens.len() + 1);
//! assert_eq!(events[3], ClassifiedEvent::Duplicate("K4LXF".to_string()));
//!
//! let report = fold(TallyReporter::default(), events);
//! assert_eq!(report.total, 2);
//! assert_eq!(report.sections, vec![2]);
//! ```
//!
//! Pipelined classification of a log file:
//! ```no_run
//! use std::sync::Arc;
//!
//! use netmgr::{
//!     engine::total::TotalCounter,
//!     roster::Roster,
//!     runtime::pipeline::{spawn_file_pipeline, PipelineConfig},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let roster = Arc::new(Roster::load("ContactListByName.csv").expect("roster"));
//! let pipeline = spawn_file_pipeline(roster, "net_log.txt", PipelineConfig::default()).expect("open log");
//! let members = pipeline.fold(TotalCounter::default()).await.expect("pipeline");
//! println!("Confirmed members: {members}");
//! # }
//! ```
#![deny(missing_docs)]

/// Check-in log reading and classification.
pub mod checkin;
/// Station configuration.
pub mod config;
/// Folds over classified check-ins.
pub mod engine;
/// Crate error type.
pub mod error;
/// Hospital net assignments.
pub mod hospital;
/// Outbound announcements.
pub mod notify;
/// Club roster.
pub mod roster;
/// Pipelined classification on tokio tasks.
pub mod runtime;
/// Net-control and city schedules.
pub mod schedule;
/// Volunteer time-sheets.
pub mod timesheet;
/// Shared primitive types.
pub mod types;
