//! Error types for calstats.

use thiserror::Error;

use crate::event::Event;
use crate::week::Week;

/// Errors that can occur while building week calendars and classifying events.
#[derive(Error, Debug)]
pub enum CalStatsError {
    #[error("Week {week} is out of range for year {year}")]
    OutOfRangeWeek { year: i32, week: u32 },

    #[error("Event is not in range of week. Event: {event}, week: {week}")]
    WeekAssignmentInconsistency { event: Box<Event>, week: Week },

    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("Invalid year: {0}")]
    InvalidYear(i32),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calstats operations.
pub type CalStatsResult<T> = Result<T, CalStatsError>;
