//! Terminal output for report lines.

use calstats_core::Reporter;
use owo_colors::OwoColorize;

/// Prints report lines to stdout and warnings to stderr.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn record_line(&mut self, line: &str) {
        println!("{}", line);
    }

    fn record_warning(&mut self, warning: &str) {
        eprintln!("{} {}", "warning:".yellow().bold(), warning.dimmed());
    }
}
