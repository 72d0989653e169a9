//! TCP connect probe.
//!
//! Performs standard TCP connect attempts using the operating system's
//! socket API and classifies the result. The stream (or the pending connect
//! future) is dropped before `probe` returns, so every call opens and
//! releases exactly one socket whatever the outcome.

use super::traits::{PortProbe, ProbeOutcome, ProbeState};
use async_trait::async_trait;
use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Default per-attempt connect timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// TCP connect probe.
///
/// Does not require elevated privileges. No application data is ever sent;
/// an open connection is closed as soon as the handshake completes.
#[derive(Debug, Clone)]
pub struct ConnectProbe {
    timeout: Duration,
}

impl ConnectProbe {
    /// Create a probe with the given per-attempt timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for ConnectProbe {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl PortProbe for ConnectProbe {
    async fn probe(&self, address: IpAddr, port: u16) -> ProbeOutcome {
        let addr = SocketAddr::new(address, port);
        let start = Instant::now();

        let outcome = match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => {
                let elapsed = start.elapsed().as_millis() as u64;
                drop(stream);
                ProbeOutcome::new(port, ProbeState::Open).with_response_time(elapsed)
            }
            Ok(Err(e)) => ProbeOutcome::new(port, classify_connect_error(&e)),
            // The connect future, and its socket, were dropped by `timeout`.
            Err(_) => ProbeOutcome::new(port, ProbeState::Filtered),
        };

        debug!(%addr, state = %outcome.state, "probe finished");
        outcome
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Map a failed connect to a port state.
pub fn classify_connect_error(e: &io::Error) -> ProbeState {
    match e.kind() {
        io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset => ProbeState::Closed,
        io::ErrorKind::TimedOut
        | io::ErrorKind::HostUnreachable
        | io::ErrorKind::NetworkUnreachable => ProbeState::Filtered,
        _ => ProbeState::Error(e.to_string()),
    }
}
