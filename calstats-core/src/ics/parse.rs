//! ICS file parsing using the icalendar crate's parser.

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};
use tracing::debug;

use crate::error::{CalStatsError, CalStatsResult};
use crate::event::Event;
use crate::week::start_of_day;

/// Read an .ics file and parse its events.
pub fn load_events(path: &Path) -> CalStatsResult<Vec<CalStatsResult<Event>>> {
    let content = std::fs::read_to_string(path)?;
    let events = parse_events(&content)?;
    debug!(path = %path.display(), count = events.len(), "Read calendar file");
    Ok(events)
}

/// Parse every VEVENT of an ICS document.
///
/// The outer error means the document itself is unreadable; each event is
/// either an [`Event`] or the reason it was rejected.
pub fn parse_events(content: &str) -> CalStatsResult<Vec<CalStatsResult<Event>>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(CalStatsError::IcsParse)?;

    Ok(calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .map(parse_vevent)
        .collect())
}

fn parse_vevent(vevent: &Component) -> CalStatsResult<Event> {
    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| p.val.to_string())
        .unwrap_or_else(|| "(No title)".to_string());

    let start = required_time(vevent, "DTSTART", &summary)?;
    let end = if vevent.find_prop("DTEND").is_some() {
        required_time(vevent, "DTEND", &summary)?
    } else {
        let duration = event_duration(vevent, &summary)?;
        start.checked_add_signed(duration).ok_or_else(|| {
            CalStatsError::MalformedEvent(format!("'{}' ends out of range", summary))
        })?
    };

    Event::new(summary, start, end)
}

/// Length of an event given by DURATION instead of DTEND (PT45M, P1D, ...).
fn event_duration(vevent: &Component, summary: &str) -> CalStatsResult<TimeDelta> {
    let prop = vevent.find_prop("DURATION").ok_or_else(|| {
        CalStatsError::MalformedEvent(format!("'{}' has neither DTEND nor DURATION", summary))
    })?;
    let unreadable = || {
        CalStatsError::MalformedEvent(format!(
            "'{}' has an unreadable DURATION: {}",
            summary,
            prop.val.as_ref()
        ))
    };

    let value = prop.val.as_ref().trim();
    if value.starts_with('-') {
        return Err(unreadable());
    }

    let duration = iso8601::duration(value.trim_start_matches('+')).map_err(|_| unreadable())?;
    let std_duration: std::time::Duration = duration.into();
    TimeDelta::from_std(std_duration).map_err(|_| unreadable())
}

fn required_time(vevent: &Component, name: &str, summary: &str) -> CalStatsResult<DateTime<Utc>> {
    let prop = vevent
        .find_prop(name)
        .ok_or_else(|| CalStatsError::MalformedEvent(format!("'{}' has no {}", summary, name)))?;
    let value = DatePerhapsTime::try_from(prop).map_err(|_| {
        CalStatsError::MalformedEvent(format!(
            "'{}' has an unreadable {}: {}",
            summary,
            name,
            prop.val.as_ref()
        ))
    })?;

    to_utc(value)
}

/// Normalize an ICS date or date-time to UTC.
///
/// All-day dates start at midnight UTC and floating times are taken as UTC.
fn to_utc(value: DatePerhapsTime) -> CalStatsResult<DateTime<Utc>> {
    match value {
        DatePerhapsTime::Date(date) => Ok(start_of_day(date)),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => Ok(dt),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => Ok(naive.and_utc()),
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            zoned_to_utc(date_time, &tzid)
        }
    }
}

fn zoned_to_utc(date_time: NaiveDateTime, tzid: &str) -> CalStatsResult<DateTime<Utc>> {
    let tz: Tz = tzid
        .parse()
        .map_err(|_| CalStatsError::MalformedEvent(format!("Unknown timezone '{}'", tzid)))?;

    // Times skipped by a DST change have no local instant; earliest() covers the repeated hour.
    tz.from_local_datetime(&date_time)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            CalStatsError::MalformedEvent(format!("{} does not exist in {}", date_time, tzid))
        })
}
