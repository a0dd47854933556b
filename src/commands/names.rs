use anyhow::Result;
use calstats_core::filter::unique_summaries;
use calstats_core::{Event, Reporter};

pub fn run(events: &[Event], reporter: &mut dyn Reporter) -> Result<()> {
    reporter.record_line("Printing unique event names (A-Z)...");
    for name in unique_summaries(events) {
        reporter.record_line(name);
    }

    Ok(())
}
