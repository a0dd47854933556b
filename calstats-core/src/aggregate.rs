//! Weekly totals and yearly averages of meeting time.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use tracing::debug;

use crate::classify::EventClassifier;
use crate::error::CalStatsError;
use crate::event::Event;
use crate::report::Reporter;
use crate::week::{Week, WeekCatalog};

/// Weeks used as the divisor for a year that is already over.
const WEEKS_IN_PAST_YEAR: u32 = 52;

/// Groups events into the weeks of a catalog.
pub struct WeeklyAggregator<'a> {
    classifier: EventClassifier<'a>,
}

impl<'a> WeeklyAggregator<'a> {
    pub fn new(catalog: &'a WeekCatalog) -> Self {
        WeeklyAggregator {
            classifier: EventClassifier::new(catalog),
        }
    }

    /// Classify every event. A failure on one event is reported and recorded
    /// without stopping the rest of the batch.
    pub fn aggregate<'e>(
        &self,
        events: impl IntoIterator<Item = &'e Event>,
        reporter: &mut dyn Reporter,
    ) -> Aggregation {
        let mut aggregation = Aggregation::default();

        for event in events {
            match self.classifier.classify(event, reporter) {
                Ok(Some(week)) => aggregation.by_week.entry(week).or_default().push(event.clone()),
                Ok(None) => aggregation.skipped.push(event.clone()),
                Err(e) => {
                    reporter.record_warning(&e.to_string());
                    aggregation.failures.push(e);
                }
            }
        }

        debug!(
            weeks = aggregation.by_week.len(),
            skipped = aggregation.skipped.len(),
            failures = aggregation.failures.len(),
            "Aggregated events"
        );
        aggregation
    }
}

/// Events grouped by week, ordered by week start.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub by_week: BTreeMap<Week, Vec<Event>>,
    /// Multi-day events left out of every total.
    pub skipped: Vec<Event>,
    /// Events that could not be assigned to any week.
    pub failures: Vec<CalStatsError>,
}

impl Aggregation {
    pub fn week_totals(&self) -> Vec<WeekTotal> {
        self.by_week
            .iter()
            .map(|(week, events)| WeekTotal {
                week: *week,
                duration: events.iter().map(Event::duration).sum(),
            })
            .collect()
    }

    /// Years of the weeks that received events.
    ///
    /// Near a year boundary these can differ from the events' own start years.
    pub fn week_years(&self) -> BTreeSet<i32> {
        self.by_week.keys().map(|week| week.year).collect()
    }

    /// Average hours per week for each of `years`, counting only weeks that
    /// have started by `now`.
    pub fn yearly_averages(&self, years: &BTreeSet<i32>, now: DateTime<Utc>) -> Vec<YearlyAverage> {
        let mut totals: BTreeMap<i32, f64> = years.iter().map(|year| (*year, 0.0)).collect();

        for total in self.week_totals() {
            if !total.week.has_started(now) {
                continue;
            }
            if let Some(sum) = totals.get_mut(&total.week.year) {
                *sum += total.hours();
            }
        }

        totals
            .into_iter()
            .map(|(year, total_hours)| YearlyAverage {
                year,
                total_hours,
                weeks: if year == now.year() {
                    now.iso_week().week()
                } else {
                    WEEKS_IN_PAST_YEAR
                },
            })
            .collect()
    }

    /// Record the weekly listing followed by the yearly averages.
    pub fn write_report(&self, years: &BTreeSet<i32>, now: DateTime<Utc>, reporter: &mut dyn Reporter) {
        reporter.record_line("Listing of summarized length of meetings per week...");
        for total in self.week_totals() {
            reporter.record_line(&total.to_string());
        }

        for average in self.yearly_averages(years, now) {
            reporter.record_line(&average.to_string());
        }
    }
}

/// Total meeting time of one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekTotal {
    pub week: Week,
    pub duration: TimeDelta,
}

impl WeekTotal {
    pub fn minutes(&self) -> f64 {
        self.duration.num_seconds() as f64 / 60.0
    }

    pub fn hours(&self) -> f64 {
        self.minutes() / 60.0
    }
}

impl fmt::Display for WeekTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}", self.week.label(), self.hours())
    }
}

/// Average weekly meeting time of one year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearlyAverage {
    pub year: i32,
    pub total_hours: f64,
    /// Divisor: elapsed ISO weeks for the current year, 52 otherwise.
    pub weeks: u32,
}

impl YearlyAverage {
    pub fn average_hours(&self) -> f64 {
        self.total_hours / self.weeks as f64
    }
}

impl fmt::Display for YearlyAverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Average hours of meetings per week in year {}: {:.2}",
            self.year,
            self.average_hours()
        )
    }
}
