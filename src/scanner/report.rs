//! The finished, read-only result of one scan.

use super::traits::{ProbeOutcome, ProbeState};
use crate::types::{PortRange, Target};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcomes for every probed port of a target, ascending by port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// What was scanned.
    pub target: Target,
    /// The requested port range.
    pub range: PortRange,
    /// When the scan was started.
    pub started_at: DateTime<Utc>,
    /// When the last worker finished.
    pub completed_at: DateTime<Utc>,
    /// Total scan duration in milliseconds.
    pub duration_ms: u64,
    /// Number of workers actually started.
    pub worker_count: usize,
    /// True if the scan was stopped before the queue was drained.
    pub cancelled: bool,
    pub open_ports: usize,
    pub closed_ports: usize,
    pub filtered_ports: usize,
    pub error_ports: usize,
    /// Individual port outcomes.
    pub outcomes: Vec<ProbeOutcome>,
}

impl ScanReport {
    /// Build a report from outcomes already sorted by port.
    pub fn new(
        target: Target,
        range: PortRange,
        outcomes: Vec<ProbeOutcome>,
        started_at: DateTime<Utc>,
        worker_count: usize,
        cancelled: bool,
    ) -> Self {
        let completed_at = Utc::now();
        let duration_ms = (completed_at - started_at).num_milliseconds().max(0) as u64;

        let mut report = Self {
            target,
            range,
            started_at,
            completed_at,
            duration_ms,
            worker_count,
            cancelled,
            open_ports: 0,
            closed_ports: 0,
            filtered_ports: 0,
            error_ports: 0,
            outcomes: Vec::new(),
        };

        for outcome in &outcomes {
            match outcome.state {
                ProbeState::Open => report.open_ports += 1,
                ProbeState::Closed => report.closed_ports += 1,
                ProbeState::Filtered => report.filtered_ports += 1,
                ProbeState::Error(_) => report.error_ports += 1,
            }
        }

        report.outcomes = outcomes;
        report
    }

    /// Number of ports that were actually probed.
    pub fn ports_scanned(&self) -> usize {
        self.outcomes.len()
    }

    /// True when every port of the range has exactly one outcome.
    pub fn is_complete(&self) -> bool {
        self.outcomes.len() == self.range.len()
            && self
                .outcomes
                .iter()
                .zip(self.range.iter())
                .all(|(outcome, port)| outcome.port == port)
    }

    /// `(port, state)` pairs in port order.
    pub fn states(&self) -> impl Iterator<Item = (u16, &ProbeState)> {
        self.outcomes.iter().map(|o| (o.port, &o.state))
    }

    /// Open ports, ascending. This is the list to hand to a fingerprinting tool.
    pub fn open(&self) -> Vec<u16> {
        self.outcomes
            .iter()
            .filter(|o| o.is_open())
            .map(|o| o.port)
            .collect()
    }

    /// Get a short summary of the scan.
    pub fn summary(&self) -> String {
        format!(
            "{} [{}] - {} open, {} closed, {} filtered, {} errors [{:.2}s]{}",
            self.target,
            self.range,
            self.open_ports,
            self.closed_ports,
            self.filtered_ports,
            self.error_ports,
            self.duration_ms as f64 / 1000.0,
            if self.cancelled { " (cancelled)" } else { "" }
        )
    }
}
