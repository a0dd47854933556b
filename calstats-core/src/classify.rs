//! Assign events to the ISO week they happen in.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, warn};

use crate::error::{CalStatsError, CalStatsResult};
use crate::event::Event;
use crate::report::Reporter;
use crate::week::{Week, WeekCatalog};

/// Highest week number every ISO year has.
const ALWAYS_PRESENT_WEEKS: u32 = 52;

/// Calendar-date ranges at the edges of a year where a week-number lookup
/// can land one week off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearEdge {
    /// December 25-31: may be numbered as week 1 of the next ISO year.
    LastDaysOfYear,
    /// January 1-7: may be numbered as the last week of the previous ISO year.
    FirstDaysOfYear,
}

/// Which year edge, if any, `date` falls in.
pub fn year_edge(date: NaiveDate) -> Option<YearEdge> {
    match (date.month(), date.day()) {
        (12, 25..=31) => Some(YearEdge::LastDaysOfYear),
        (1, 1..=7) => Some(YearEdge::FirstDaysOfYear),
        _ => None,
    }
}

/// Resolves events to weeks of a [`WeekCatalog`].
pub struct EventClassifier<'a> {
    catalog: &'a WeekCatalog,
}

impl<'a> EventClassifier<'a> {
    pub fn new(catalog: &'a WeekCatalog) -> Self {
        EventClassifier { catalog }
    }

    /// The week `event` belongs to, or `None` for a multi-day event.
    ///
    /// Skipped events are reported as warnings.
    pub fn classify(&self, event: &Event, reporter: &mut dyn Reporter) -> CalStatsResult<Option<Week>> {
        if event.spans_multiple_days() {
            info!(event = %event, "Ignoring multi day event");
            reporter.record_warning(&format!("Ignoring multi day event: {}", event));
            return Ok(None);
        }

        self.resolve(event, event.iso_week()).map(Some)
    }

    /// Resolve `event` starting from `week_number` of the event's calendar year.
    ///
    /// The number comes from an ISO week-numbering calendar, which near the
    /// turn of the year refers to a different year than the event's own.
    /// Those cases are corrected through the neighbouring year's weeks; any
    /// other mismatch is a [`CalStatsError::WeekAssignmentInconsistency`].
    pub fn resolve(&self, event: &Event, week_number: u32) -> CalStatsResult<Week> {
        let year = event.year();
        let candidate = self.lookup(year, week_number)?;

        if candidate.contains(event) {
            return Ok(candidate);
        }

        let corrections = match year_edge(event.start_date()) {
            Some(YearEdge::LastDaysOfYear) => [
                self.catalog.last_week_of(year).ok(),
                self.catalog.first_week_of(year + 1).ok(),
            ],
            Some(YearEdge::FirstDaysOfYear) => [self.catalog.last_week_of(year - 1).ok(), None],
            None => [None, None],
        };

        match corrections.into_iter().flatten().find(|week| week.contains(event)) {
            Some(week) => {
                debug!(
                    event = %event,
                    candidate = %candidate.label(),
                    resolved = %week.label(),
                    "Corrected week at year boundary"
                );
                Ok(week)
            }
            None => {
                warn!(event = %event, week = %candidate, "Event is not in range of week");
                Err(CalStatsError::WeekAssignmentInconsistency {
                    event: Box::new(event.clone()),
                    week: candidate,
                })
            }
        }
    }

    /// Look up a week, clamping numbers past the year's last week to 52 and
    /// falling back to the previous year.
    fn lookup(&self, year: i32, week_number: u32) -> CalStatsResult<Week> {
        match self.catalog.week_of(year, week_number) {
            Err(CalStatsError::OutOfRangeWeek { .. }) => {
                let clamped = week_number.min(ALWAYS_PRESENT_WEEKS);
                debug!(year, week_number, clamped, "Week out of range, retrying");
                self.catalog
                    .week_of(year, clamped)
                    .or_else(|_| self.catalog.week_of(year - 1, clamped))
            }
            found => found,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CollectingReporter;
    use chrono::{TimeZone, Utc};

    fn event(start: (i32, u32, u32, u32, u32), end: (i32, u32, u32, u32, u32)) -> Event {
        Event::new(
            "Meeting",
            Utc.with_ymd_and_hms(start.0, start.1, start.2, start.3, start.4, 0).unwrap(),
            Utc.with_ymd_and_hms(end.0, end.1, end.2, end.3, end.4, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_year_edge_ranges() {
        let date = |m, d| NaiveDate::from_ymd_opt(2021, m, d).unwrap();

        assert_eq!(year_edge(date(12, 24)), None);
        assert_eq!(year_edge(date(12, 25)), Some(YearEdge::LastDaysOfYear));
        assert_eq!(year_edge(date(12, 31)), Some(YearEdge::LastDaysOfYear));
        assert_eq!(year_edge(date(1, 1)), Some(YearEdge::FirstDaysOfYear));
        assert_eq!(year_edge(date(1, 7)), Some(YearEdge::FirstDaysOfYear));
        assert_eq!(year_edge(date(1, 8)), None);
    }

    #[test]
    fn test_mid_year_event_resolves_directly() {
        let catalog = WeekCatalog::build([2021]).unwrap();
        let classifier = EventClassifier::new(&catalog);
        let mut reporter = CollectingReporter::default();

        let ev = event((2021, 6, 7, 9, 0), (2021, 6, 7, 10, 0));
        let week = classifier.classify(&ev, &mut reporter).unwrap().unwrap();

        assert_eq!((week.year, week.number), (2021, 23));
        assert_eq!(week.start, Utc.with_ymd_and_hms(2021, 6, 7, 0, 0, 0).unwrap());
        assert_eq!(week.end, Utc.with_ymd_and_hms(2021, 6, 13, 23, 59, 59).unwrap());
        assert!(reporter.warnings.is_empty());
    }

    #[test]
    fn test_multi_day_event_is_skipped_and_reported() {
        let catalog = WeekCatalog::build([2021]).unwrap();
        let classifier = EventClassifier::new(&catalog);
        let mut reporter = CollectingReporter::default();

        let ev = event((2021, 6, 7, 23, 0), (2021, 6, 8, 1, 0));
        let week = classifier.classify(&ev, &mut reporter).unwrap();

        assert_eq!(week, None);
        assert_eq!(reporter.warnings.len(), 1);
        assert!(reporter.warnings[0].starts_with("Ignoring multi day event"));
    }

    #[test]
    fn test_december_week_one_number_resolves_to_last_week() {
        // 2020-12-31 belongs to 2020-W53; feed it a week-1 number as some
        // week-numbering calendars report for trailing December dates.
        let catalog = WeekCatalog::with_adjacent_years([2020]).unwrap();
        let classifier = EventClassifier::new(&catalog);

        let ev = event((2020, 12, 31, 10, 0), (2020, 12, 31, 11, 0));
        let week = classifier.resolve(&ev, 1).unwrap();

        assert_eq!((week.year, week.number), (2020, 53));
    }

    #[test]
    fn test_december_31_classifies_to_week_53() {
        let catalog = WeekCatalog::with_adjacent_years([2020]).unwrap();
        let classifier = EventClassifier::new(&catalog);
        let mut reporter = CollectingReporter::default();

        let ev = event((2020, 12, 31, 10, 0), (2020, 12, 31, 11, 0));
        let week = classifier.classify(&ev, &mut reporter).unwrap().unwrap();

        assert_eq!((week.year, week.number), (2020, 53));
    }

    #[test]
    fn test_new_year_day_resolves_to_previous_year_last_week() {
        let catalog = WeekCatalog::with_adjacent_years([2021]).unwrap();
        let classifier = EventClassifier::new(&catalog);
        let mut reporter = CollectingReporter::default();

        let ev = event((2021, 1, 1, 9, 0), (2021, 1, 1, 10, 0));
        assert_eq!(ev.iso_week(), 53);

        let week = classifier.classify(&ev, &mut reporter).unwrap().unwrap();

        assert_eq!((week.year, week.number), (2020, 53));
        assert!(week.contains(&ev));
    }

    #[test]
    fn test_early_january_in_52_week_previous_year() {
        // 2022-01-01 is a Saturday in 2021-W52.
        let catalog = WeekCatalog::with_adjacent_years([2022]).unwrap();
        let classifier = EventClassifier::new(&catalog);
        let mut reporter = CollectingReporter::default();

        let ev = event((2022, 1, 1, 9, 0), (2022, 1, 1, 10, 0));
        let week = classifier.classify(&ev, &mut reporter).unwrap().unwrap();

        assert_eq!((week.year, week.number), (2021, 52));
    }

    #[test]
    fn test_late_december_in_next_iso_year_resolves_to_its_first_week() {
        // 2024-12-31 is a Tuesday in 2025-W01.
        let catalog = WeekCatalog::with_adjacent_years([2024]).unwrap();
        let classifier = EventClassifier::new(&catalog);
        let mut reporter = CollectingReporter::default();

        let ev = event((2024, 12, 31, 14, 0), (2024, 12, 31, 15, 0));
        let week = classifier.classify(&ev, &mut reporter).unwrap().unwrap();

        assert_eq!((week.year, week.number), (2025, 1));
        assert!(week.contains(&ev));
    }

    #[test]
    fn test_missing_previous_year_is_an_inconsistency() {
        let catalog = WeekCatalog::build([2021]).unwrap();
        let classifier = EventClassifier::new(&catalog);
        let mut reporter = CollectingReporter::default();

        let ev = event((2021, 1, 1, 9, 0), (2021, 1, 1, 10, 0));
        let result = classifier.classify(&ev, &mut reporter);

        assert!(matches!(
            result,
            Err(CalStatsError::WeekAssignmentInconsistency { .. })
        ));
    }

    #[test]
    fn test_wrong_week_number_outside_year_edges_is_an_inconsistency() {
        let catalog = WeekCatalog::build([2021]).unwrap();
        let classifier = EventClassifier::new(&catalog);

        let ev = event((2021, 6, 9, 9, 0), (2021, 6, 9, 10, 0));
        match classifier.resolve(&ev, 10) {
            Err(CalStatsError::WeekAssignmentInconsistency { event, week }) => {
                assert_eq!(*event, ev);
                assert_eq!(week.number, 10);
            }
            other => panic!("Expected inconsistency, got {:?}", other),
        }
    }

    #[test]
    fn test_every_day_of_the_years_resolves_to_a_containing_week() {
        let catalog = WeekCatalog::with_adjacent_years(2015..=2027).unwrap();
        let classifier = EventClassifier::new(&catalog);
        let mut reporter = CollectingReporter::default();

        let mut day = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
        let last = NaiveDate::from_ymd_opt(2027, 12, 31).unwrap();
        while day <= last {
            let start = day.and_hms_opt(12, 0, 0).unwrap().and_utc();
            let ev = Event::new("Noon", start, start + chrono::Duration::minutes(30)).unwrap();

            let week = classifier.classify(&ev, &mut reporter).unwrap().unwrap();
            assert!(week.contains(&ev), "{} not in {}", ev, week);
            assert_eq!(week.number, start.iso_week().week(), "{}", ev);
            assert_eq!(week.year, start.iso_week().year(), "{}", ev);

            day = day.succ_opt().unwrap();
        }
    }
}
