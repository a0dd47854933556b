//! Weekly meeting-time statistics for calendar exports.
//!
//! This crate provides the pieces used by calstats-cli:
//! - `week` for the ISO-8601 week calendar of a year
//! - `classify` for assigning events to weeks across year boundaries
//! - `aggregate` for weekly totals and yearly averages
//! - `ics`, `filter` and `config` for getting events in

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod ics;
pub mod report;
pub mod week;

pub use aggregate::{Aggregation, WeekTotal, WeeklyAggregator, YearlyAverage};
pub use classify::EventClassifier;
pub use error::{CalStatsError, CalStatsResult};
pub use event::Event;
pub use report::{CollectingReporter, Reporter};
pub use week::{Week, WeekCatalog};
