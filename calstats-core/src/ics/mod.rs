//! Reading events out of .ics files.

mod parse;

pub use parse::{load_events, parse_events};
