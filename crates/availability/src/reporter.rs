//! Availability report output.

use crate::stats::StatsSnapshot;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Receives the stats snapshot once per cycle
pub trait Reporter: Send + Sync {
    fn report(&self, snapshot: &StatsSnapshot);
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn report(&self, snapshot: &StatsSnapshot) {
        (**self).report(snapshot)
    }
}

/// One `"<domain> has <pct>% availability"` line per domain, in domain order.
pub fn format_report(snapshot: &StatsSnapshot) -> Vec<String> {
    snapshot
        .iter()
        .map(|(domain, stats)| format!("{} has {}% availability", domain, stats.percentage()))
        .collect()
}

/// Writes report lines to any writer
pub struct WriterReporter<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the reporter and return the writer
    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_lines(&self, lines: &[String]) -> io::Result<()> {
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        for line in lines {
            writeln!(writer, "{line}")?;
        }
        writer.flush()
    }
}

impl WriterReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Reporter for WriterReporter<W> {
    fn report(&self, snapshot: &StatsSnapshot) {
        if let Err(e) = self.write_lines(&format_report(snapshot)) {
            warn!(error = %e, "Failed to write availability report");
        }
    }
}
