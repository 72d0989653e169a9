//! Scanner module - resolves a target and drives the worker pool over a
//! port range.
//!
//! A scan runs in four steps: resolve the hostname, fill the job queue,
//! let the pool drain it, then finalize the collector into a report.

pub mod collector;
pub mod pool;
pub mod probe;
pub mod queue;
pub mod report;
pub mod traits;

use crate::error::{ScanError, ScanResult};
use crate::resolver;
use crate::types::PortRange;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub use collector::ResultCollector;
pub use pool::{pool_size, WorkerPool, DEFAULT_WORKERS};
pub use probe::{ConnectProbe, DEFAULT_TIMEOUT};
pub use queue::PortJobQueue;
pub use report::ScanReport;
pub use traits::{PortProbe, ProbeOutcome, ProbeState, ScanJob};

/// Configuration for a scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Hostname or IP literal to scan.
    pub hostname: String,
    /// Ports to probe.
    pub range: PortRange,
    /// Maximum number of concurrent workers.
    pub worker_count: usize,
    /// Per-probe connect timeout.
    pub timeout: Duration,
    /// Draw a progress bar on stderr.
    pub show_progress: bool,
}

impl ScanConfig {
    /// Create a configuration with default workers and timeout.
    pub fn new(hostname: impl Into<String>, range: PortRange) -> Self {
        Self {
            hostname: hostname.into(),
            range,
            worker_count: DEFAULT_WORKERS,
            timeout: DEFAULT_TIMEOUT,
            show_progress: false,
        }
    }

    /// Set the maximum number of workers.
    pub fn with_workers(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    /// Set the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable the progress bar.
    pub fn with_progress(mut self) -> Self {
        self.show_progress = true;
        self
    }

    fn validate(&self) -> ScanResult<()> {
        if self.worker_count == 0 {
            return Err(ScanError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ScanError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Execute a complete TCP connect scan.
///
/// Only resolution failures and invalid configuration are errors; every
/// per-port condition ends up in the report.
pub async fn run_scan(config: ScanConfig, cancel: CancellationToken) -> ScanResult<ScanReport> {
    let probe = Arc::new(ConnectProbe::new(config.timeout));
    run_scan_with_probe(config, probe, cancel).await
}

/// Same as [`run_scan`] with a caller-supplied probe.
pub async fn run_scan_with_probe(
    config: ScanConfig,
    probe: Arc<dyn PortProbe>,
    cancel: CancellationToken,
) -> ScanResult<ScanReport> {
    config.validate()?;

    let target = resolver::resolve(&config.hostname).await?;
    let started_at = Utc::now();

    let queue = Arc::new(PortJobQueue::from_range(config.range));
    let workers = pool_size(config.worker_count, config.range.len());

    info!(
        host = %target,
        range = %config.range,
        workers,
        timeout_ms = config.timeout.as_millis() as u64,
        "starting scan"
    );

    let mut collector = ResultCollector::with_capacity(config.range.len());
    if config.show_progress {
        collector = collector.with_progress(progress_bar(config.range.len()));
    }

    let pool = WorkerPool::start(
        Arc::clone(&queue),
        collector,
        workers,
        probe,
        target.address,
        cancel.clone(),
    );
    let worker_count = pool.worker_count();
    let collector = pool.await_completion().await;

    let cancelled = cancel.is_cancelled() && !queue.is_empty();
    if cancelled {
        warn!(skipped = queue.remaining(), "scan cancelled before all ports were probed");
    }

    let report = collector.finalize(target, config.range, started_at, worker_count, cancelled);
    info!(summary = %report.summary(), "scan finished");
    Ok(report)
}

fn progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}
