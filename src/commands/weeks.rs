use anyhow::Result;
use calstats_core::event::event_years;
use calstats_core::{Event, Reporter, WeekCatalog, WeeklyAggregator};
use chrono::{DateTime, Utc};

pub fn run(events: Vec<Event>, reporter: &mut dyn Reporter) -> Result<()> {
    report(&events, Utc::now(), reporter)
}

fn report(events: &[Event], now: DateTime<Utc>, reporter: &mut dyn Reporter) -> Result<()> {
    if events.is_empty() {
        reporter.record_line("No events found");
        return Ok(());
    }

    let mut years = event_years(events);
    let catalog = WeekCatalog::with_adjacent_years(years.iter().copied())?;

    let aggregation = WeeklyAggregator::new(&catalog).aggregate(events, reporter);

    // Events moved across a year boundary still count toward their week's year.
    years.extend(aggregation.week_years());
    aggregation.write_report(&years, now, reporter);

    if !aggregation.failures.is_empty() {
        anyhow::bail!(
            "{} event(s) could not be assigned to a week",
            aggregation.failures.len()
        );
    }

    Ok(())
}
