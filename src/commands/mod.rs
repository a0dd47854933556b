pub mod names;
pub mod weeks;

use std::path::Path;

use anyhow::{Context, Result};
use calstats_core::filter::EventFilter;
use calstats_core::{Event, Reporter};

/// Read the calendar file and apply the filter.
///
/// Events that cannot be read are reported and left out.
pub fn read_events(path: &Path, filter: &EventFilter, reporter: &mut dyn Reporter) -> Result<Vec<Event>> {
    let parsed = calstats_core::ics::load_events(path)
        .with_context(|| format!("Could not read calendar file {}", path.display()))?;

    let mut events = Vec::with_capacity(parsed.len());
    for result in parsed {
        match result {
            Ok(event) => events.push(event),
            Err(e) => reporter.record_warning(&e.to_string()),
        }
    }

    Ok(filter.apply(events))
}
