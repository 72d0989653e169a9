//! Probe trait abstraction and the per-port result types.
//!
//! The worker pool only talks to a [`PortProbe`], which lets tests drive it
//! with a scripted probe instead of real sockets.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

/// Reachability state of a probed port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "reason")]
pub enum ProbeState {
    /// Handshake completed.
    Open,
    /// Connection actively refused (RST received).
    Closed,
    /// No answer within the timeout, or host/network unreachable.
    Filtered,
    /// The probe itself failed for a reason unrelated to the target's policy.
    Error(String),
}

impl ProbeState {
    /// Short label without the error reason.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Filtered => "filtered",
            Self::Error(_) => "error",
        }
    }
}

impl fmt::Display for ProbeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(reason) => write!(f, "error ({})", reason),
            other => f.write_str(other.label()),
        }
    }
}

/// Result of probing a single port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    /// The port number that was probed.
    pub port: u16,
    /// State determined by the probe.
    #[serde(flatten)]
    pub state: ProbeState,
    /// When the probe finished.
    pub observed_at: DateTime<Utc>,
    /// Connect latency in milliseconds, set for open ports.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub response_time_ms: Option<u64>,
}

impl ProbeOutcome {
    /// Create an outcome stamped with the current time.
    pub fn new(port: u16, state: ProbeState) -> Self {
        Self {
            port,
            state,
            observed_at: Utc::now(),
            response_time_ms: None,
        }
    }

    /// Set the response time.
    pub fn with_response_time(mut self, time_ms: u64) -> Self {
        self.response_time_ms = Some(time_ms);
        self
    }

    /// Check if the port is open.
    pub fn is_open(&self) -> bool {
        self.state == ProbeState::Open
    }
}

/// A unit of work: one port waiting to be probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanJob {
    pub port: u16,
}

/// A single-port reachability check.
///
/// Implementations must never panic on network errors; every condition
/// maps to a [`ProbeState`]. They must also release any socket they open
/// before returning.
#[async_trait]
pub trait PortProbe: Send + Sync {
    /// Probe `port` on `address`.
    async fn probe(&self, address: IpAddr, port: u16) -> ProbeOutcome;

    /// Upper bound on how long a single probe may take. The worker pool
    /// enforces it (plus a small slack) and records an overrun as filtered.
    fn timeout(&self) -> Duration;
}
