//! ISO-8601 week calendar.
//!
//! Weeks run Monday 00:00:00 to Sunday 23:59:59 (UTC) and are numbered so
//! that week 1 holds the year's first Thursday.

mod boundaries;
mod catalog;

pub use boundaries::{iso_weeks_in_year, week_boundaries};
pub use catalog::WeekCatalog;

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};

use crate::event::Event;

/// One ISO week of a given year.
///
/// Identity is `(year, number)`; ordering follows the start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Week {
    pub year: i32,
    pub number: u32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Week {
    /// Week from its Monday to its Sunday, normalized to the first and last
    /// second of those days.
    pub fn new(year: i32, number: u32, monday: NaiveDate, sunday: NaiveDate) -> Self {
        Week {
            year,
            number,
            start: start_of_day(monday),
            end: end_of_day(sunday),
        }
    }

    /// Whether the event lies entirely inside this week.
    pub fn contains(&self, event: &Event) -> bool {
        self.start <= event.start() && event.end() <= self.end
    }

    /// Whether the week has begun at `now`.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.end <= now || self.start < now
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.year, self.number)
    }
}

impl Ord for Week {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| (self.year, self.number).cmp(&(other.year, other.number)))
    }
}

impl PartialOrd for Week {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} - {})",
            self.label(),
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

pub(crate) fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

pub(crate) fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(23, 59, 59)
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|| start_of_day(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn june_week() -> Week {
        Week::new(
            2021,
            23,
            NaiveDate::from_ymd_opt(2021, 6, 7).unwrap(),
            NaiveDate::from_ymd_opt(2021, 6, 13).unwrap(),
        )
    }

    #[test]
    fn test_week_is_normalized_to_full_days() {
        let week = june_week();
        assert_eq!(week.start, Utc.with_ymd_and_hms(2021, 6, 7, 0, 0, 0).unwrap());
        assert_eq!(week.end, Utc.with_ymd_and_hms(2021, 6, 13, 23, 59, 59).unwrap());
        assert_eq!(week.label(), "2021-23");
    }

    #[test]
    fn test_contains_checks_both_ends() {
        let week = june_week();
        let inside = Event::new(
            "Sync",
            Utc.with_ymd_and_hms(2021, 6, 13, 22, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 6, 13, 23, 0, 0).unwrap(),
        )
        .unwrap();
        let before = Event::new(
            "Sync",
            Utc.with_ymd_and_hms(2021, 6, 6, 22, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2021, 6, 6, 23, 0, 0).unwrap(),
        )
        .unwrap();

        assert!(week.contains(&inside));
        assert!(!week.contains(&before));
    }

    #[test]
    fn test_weeks_order_by_start() {
        let earlier = Week::new(
            2020,
            53,
            NaiveDate::from_ymd_opt(2020, 12, 28).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 3).unwrap(),
        );
        let later = Week::new(
            2021,
            1,
            NaiveDate::from_ymd_opt(2021, 1, 4).unwrap(),
            NaiveDate::from_ymd_opt(2021, 1, 10).unwrap(),
        );

        assert!(earlier < later);
        assert!(later < june_week());
    }

    #[test]
    fn test_has_started() {
        let week = june_week();
        assert!(!week.has_started(Utc.with_ymd_and_hms(2021, 6, 6, 12, 0, 0).unwrap()));
        assert!(week.has_started(Utc.with_ymd_and_hms(2021, 6, 9, 12, 0, 0).unwrap()));
        assert!(week.has_started(Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()));
    }
}
