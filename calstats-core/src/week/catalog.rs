//! Table of ISO weeks for a set of years.

use std::collections::BTreeMap;

use chrono::Days;
use tracing::debug;

use super::{Week, week_boundaries};
use crate::error::{CalStatsError, CalStatsResult};

/// All ISO weeks of the requested years.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct WeekCatalog {
    weeks_by_year: BTreeMap<i32, Vec<Week>>,
}

impl WeekCatalog {
    /// Build the weeks of exactly the given years.
    pub fn build(years: impl IntoIterator<Item = i32>) -> CalStatsResult<Self> {
        let mut weeks_by_year = BTreeMap::new();

        for year in years {
            if weeks_by_year.contains_key(&year) {
                continue;
            }
            let weeks = weeks_of_year(year)?;
            debug!(year, weeks = weeks.len(), "Built week catalog entry");
            weeks_by_year.insert(year, weeks);
        }

        Ok(WeekCatalog { weeks_by_year })
    }

    /// Build the given years together with the year before and after each,
    /// so events near a year boundary always find a neighbouring week.
    pub fn with_adjacent_years(years: impl IntoIterator<Item = i32>) -> CalStatsResult<Self> {
        let mut all_years = Vec::new();
        for year in years {
            let previous = year.checked_sub(1).ok_or(CalStatsError::InvalidYear(year))?;
            let next = year.checked_add(1).ok_or(CalStatsError::InvalidYear(year))?;
            all_years.extend([previous, year, next]);
        }

        Self::build(all_years)
    }

    /// Week `number` (1-based) of `year`.
    pub fn week_of(&self, year: i32, number: u32) -> CalStatsResult<Week> {
        let out_of_range = || CalStatsError::OutOfRangeWeek { year, week: number };

        let weeks = self.weeks_by_year.get(&year).ok_or_else(out_of_range)?;
        let index = number.checked_sub(1).ok_or_else(out_of_range)? as usize;
        weeks.get(index).copied().ok_or_else(out_of_range)
    }

    pub fn first_week_of(&self, year: i32) -> CalStatsResult<Week> {
        self.week_of(year, 1)
    }

    pub fn last_week_of(&self, year: i32) -> CalStatsResult<Week> {
        self.weeks(year)
            .and_then(|weeks| weeks.last().copied())
            .ok_or(CalStatsError::OutOfRangeWeek { year, week: 0 })
    }

    pub fn weeks(&self, year: i32) -> Option<&[Week]> {
        self.weeks_by_year.get(&year).map(Vec::as_slice)
    }

    pub fn week_count(&self, year: i32) -> Option<usize> {
        self.weeks_by_year.get(&year).map(Vec::len)
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.weeks_by_year.keys().copied()
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.weeks_by_year.contains_key(&year)
    }
}

/// Pair each boundary Monday with the next one to form the year's weeks.
fn weeks_of_year(year: i32) -> CalStatsResult<Vec<Week>> {
    let boundaries = week_boundaries(year)?;

    boundaries
        .windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let sunday = pair[1]
                .checked_sub_days(Days::new(1))
                .ok_or(CalStatsError::InvalidYear(year))?;
            Ok(Week::new(year, i as u32 + 1, pair[0], sunday))
        })
        .collect()
}
