//! # portsweep - A Concurrent TCP Port-Reachability Scanner
//!
//! portsweep resolves a host, then probes every port of a range with a TCP
//! connect from a fixed-size pool of workers sharing one job queue. Each port
//! is reported exactly once as open, closed, filtered, or error.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::{run_scan, ScanConfig};
//! use portsweep::types::PortRange;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() {
//!     let range: PortRange = "7999-8001".parse().unwrap();
//!     let config = ScanConfig::new("127.0.0.1", range)
//!         .with_workers(100)
//!         .with_timeout(Duration::from_secs(1));
//!
//!     let report = run_scan(config, CancellationToken::new()).await.unwrap();
//!     for (port, state) in report.states() {
//!         println!("{} {}", port, state);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`resolver`] - Hostname to a single address
//! - [`scanner`] - Job queue, connect probe, worker pool and result collector
//! - [`types`] - Port ranges and targets
//! - [`config`] - Settings file handling
//! - [`output`] - Plain, JSON and CSV rendering of finished reports
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod resolver;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ResolutionError, ScanError};
pub use scanner::{run_scan, ProbeOutcome, ProbeState, ScanConfig, ScanReport};
pub use types::{PortRange, Target};
