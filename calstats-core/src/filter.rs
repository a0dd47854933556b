//! Event selection applied before the weekly statistics.

use std::collections::BTreeSet;

use tracing::info;

use crate::event::Event;

/// Drops events by summary substring and keeps only the allowed years.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Events whose summary contains any of these are removed.
    pub exclusions: Vec<String>,
    /// When non-empty, only events starting in these years are kept.
    pub years: BTreeSet<i32>,
}

impl EventFilter {
    pub fn new(exclusions: Vec<String>, years: impl IntoIterator<Item = i32>) -> Self {
        EventFilter {
            exclusions,
            years: years.into_iter().collect(),
        }
    }

    pub fn is_excluded(&self, event: &Event) -> bool {
        self.exclusions
            .iter()
            .any(|pattern| event.summary().contains(pattern.as_str()))
    }

    pub fn is_allowed_year(&self, event: &Event) -> bool {
        self.years.is_empty() || self.years.contains(&event.year())
    }

    /// Apply the filter, returning the kept events sorted by start time.
    pub fn apply(&self, events: Vec<Event>) -> Vec<Event> {
        let (mut kept, removed): (Vec<Event>, Vec<Event>) =
            events.into_iter().partition(|event| !self.is_excluded(event));

        if !removed.is_empty() {
            let names: Vec<&str> = removed.iter().map(Event::summary).collect();
            info!(count = removed.len(), ?names, "Removing events as exceptions");
        }

        if !self.years.is_empty() {
            info!(years = ?self.years, "Filtering events, only with years");
            kept.retain(|event| self.is_allowed_year(event));
        }

        kept.sort_by_key(Event::start);
        kept
    }
}

/// Distinct event summaries, A-Z.
pub fn unique_summaries<'a>(events: impl IntoIterator<Item = &'a Event>) -> BTreeSet<&'a str> {
    events.into_iter().map(Event::summary).collect()
}
