//! Week-start Mondays of an ISO-8601 year.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::error::{CalStatsError, CalStatsResult};

/// Mondays starting each ISO week of `year`, in order, followed by one
/// terminating Monday: the start of week 1 of `year + 1`.
///
/// The terminator only closes the last week, so the result holds
/// `iso_weeks_in_year(year) + 1` dates.
pub fn week_boundaries(year: i32) -> CalStatsResult<Vec<NaiveDate>> {
    let mut monday = first_week_monday(year)?;
    let mut boundaries = Vec::with_capacity(54);

    // A week belongs to the year its Thursday falls in.
    while thursday_of(monday, year)?.year() == year {
        boundaries.push(monday);
        monday = monday
            .checked_add_days(Days::new(7))
            .ok_or(CalStatsError::InvalidYear(year))?;
    }
    boundaries.push(monday);

    let usable = boundaries.len() - 1;
    if usable as u32 != iso_weeks_in_year(year)? {
        return Err(CalStatsError::InvalidYear(year));
    }

    Ok(boundaries)
}

/// Number of ISO weeks in `year`: 53 when January 1 is a Thursday, or a
/// Wednesday in a leap year, else 52.
pub fn iso_weeks_in_year(year: i32) -> CalStatsResult<u32> {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CalStatsError::InvalidYear(year))?;
    let long_year = match jan_first.weekday() {
        Weekday::Thu => true,
        Weekday::Wed => NaiveDate::from_ymd_opt(year, 2, 29).is_some(),
        _ => false,
    };

    Ok(if long_year { 53 } else { 52 })
}

/// Monday that starts week 1 of `year`.
///
/// January 1 on Friday to Sunday sits in the previous year's last week, so
/// week 1 starts on the following Monday. Otherwise January 1 is already in
/// week 1, which started on the Monday on or before it.
fn first_week_monday(year: i32) -> CalStatsResult<NaiveDate> {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(CalStatsError::InvalidYear(year))?;
    let offset = jan_first.weekday().num_days_from_monday();

    let monday = if offset > Weekday::Thu.num_days_from_monday() {
        jan_first.checked_add_days(Days::new(7 - offset as u64))
    } else {
        jan_first.checked_sub_days(Days::new(offset as u64))
    };

    monday.ok_or(CalStatsError::InvalidYear(year))
}

fn thursday_of(monday: NaiveDate, year: i32) -> CalStatsResult<NaiveDate> {
    monday
        .checked_add_days(Days::new(3))
        .ok_or(CalStatsError::InvalidYear(year))
}
