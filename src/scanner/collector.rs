//! Thread-safe sink for probe outcomes.
//!
//! Workers append from any task in any order. Only the pool hands out extra
//! handles, and it gives the collector back from `await_completion`, so
//! `finalize` cannot run while a worker still holds a handle.

use super::report::ScanReport;
use super::traits::ProbeOutcome;
use crate::types::{PortRange, Target};
use chrono::{DateTime, Utc};
use indicatif::ProgressBar;
use std::sync::{Arc, Mutex, MutexGuard};

/// Aggregates [`ProbeOutcome`]s from every worker.
#[derive(Default)]
pub struct ResultCollector {
    outcomes: Arc<Mutex<Vec<ProbeOutcome>>>,
    progress: Option<ProgressBar>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the buffer for `expected` outcomes.
    pub fn with_capacity(expected: usize) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::with_capacity(expected))),
            progress: None,
        }
    }

    /// Advance `progress` once per recorded outcome.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// A second handle onto the same buffer, for a worker.
    pub(crate) fn handle(&self) -> Self {
        Self {
            outcomes: Arc::clone(&self.outcomes),
            progress: self.progress.clone(),
        }
    }

    /// Append one outcome.
    pub fn record(&self, outcome: ProbeOutcome) {
        if let Some(pb) = &self.progress {
            pb.inc(1);
            if outcome.is_open() {
                pb.set_message(format!("Found open port: {}", outcome.port));
            }
        }
        self.lock().push(outcome);
    }

    /// Number of outcomes recorded so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sort everything recorded by port and build the report.
    pub fn finalize(
        self,
        target: Target,
        range: PortRange,
        started_at: DateTime<Utc>,
        worker_count: usize,
        cancelled: bool,
    ) -> ScanReport {
        if let Some(pb) = &self.progress {
            pb.finish_with_message(if cancelled { "Scan cancelled" } else { "Scan complete" });
        }

        let mut outcomes = std::mem::take(&mut *self.lock());
        outcomes.sort_by_key(|o| o.port);

        ScanReport::new(target, range, outcomes, started_at, worker_count, cancelled)
    }

    // Pushing into a Vec cannot leave it half-written, so a poisoned lock
    // still guards consistent data.
    fn lock(&self) -> MutexGuard<'_, Vec<ProbeOutcome>> {
        self.outcomes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
