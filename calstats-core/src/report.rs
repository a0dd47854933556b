//! Output collaborator for report lines and warnings.
//!
//! The core never prints; everything meant for the user goes through a
//! [`Reporter`] supplied by the caller.

/// Receives the lines of a report and any warnings raised while building it.
pub trait Reporter {
    fn record_line(&mut self, line: &str);
    fn record_warning(&mut self, warning: &str);
}

/// Reporter that keeps everything in memory.
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    pub lines: Vec<String>,
    pub warnings: Vec<String>,
}

impl Reporter for CollectingReporter {
    fn record_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn record_warning(&mut self, warning: &str) {
        self.warnings.push(warning.to_string());
    }
}
