//! Calendar events as seen by the weekly statistics.
//!
//! Only the fields needed for week assignment are kept: the summary and the
//! start/end instants, already normalized to UTC by whoever read the calendar.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};

use crate::error::{CalStatsError, CalStatsResult};

/// A single calendar event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    summary: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Event {
    /// Create an event, rejecting one that ends before it starts.
    pub fn new(
        summary: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> CalStatsResult<Self> {
        let summary = summary.into();
        if end < start {
            return Err(CalStatsError::MalformedEvent(format!(
                "'{}' ends ({}) before it starts ({})",
                summary, end, start
            )));
        }

        Ok(Event {
            summary,
            start,
            end,
        })
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Calendar year of the start instant.
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// ISO-8601 week number of the start instant.
    ///
    /// This belongs to the ISO week-numbering year, which differs from
    /// [`Event::year`] for the first and last few days of a calendar year.
    pub fn iso_week(&self) -> u32 {
        self.start.iso_week().week()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn duration_minutes(&self) -> f64 {
        self.duration().num_seconds() as f64 / 60.0
    }

    /// True when start and end fall on different calendar dates,
    /// regardless of how much time actually elapses.
    pub fn spans_multiple_days(&self) -> bool {
        self.start.date_naive() != self.end.date_naive()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} - {})",
            self.summary,
            self.start.format("%Y-%m-%d %H:%M"),
            self.end.format("%Y-%m-%d %H:%M")
        )
    }
}

/// Distinct calendar years the events start in.
pub fn event_years<'a>(events: impl IntoIterator<Item = &'a Event>) -> BTreeSet<i32> {
    events.into_iter().map(Event::year).collect()
}
