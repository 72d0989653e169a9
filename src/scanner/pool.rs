//! Fixed-size pool of probing workers.
//!
//! Each worker is a tokio task looping over: check cancellation, take a job,
//! probe, record. A worker exits the first time it finds the queue empty.
//! Since a worker holds at most one probe (and so one socket) at a time,
//! the pool never has more than `worker_count` sockets open.
//!
//! Every probe is capped at its own `timeout()` plus [`PROBE_SLACK`]; a probe
//! that overruns is dropped and the port recorded as filtered.

use super::collector::ResultCollector;
use super::queue::PortJobQueue;
use super::traits::{PortProbe, ProbeOutcome, ProbeState};
use futures::FutureExt;
use std::any::Any;
use std::net::IpAddr;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Default number of concurrent workers.
pub const DEFAULT_WORKERS: usize = 100;

/// Grace period on top of a probe's own timeout before the pool gives up on it.
pub const PROBE_SLACK: Duration = Duration::from_millis(100);

/// Number of workers worth starting: never more than there are ports.
pub fn pool_size(configured: usize, port_count: usize) -> usize {
    configured.min(port_count).max(1)
}

/// A running set of workers draining one [`PortJobQueue`].
pub struct WorkerPool {
    workers: JoinSet<()>,
    collector: ResultCollector,
    worker_count: usize,
}

impl WorkerPool {
    /// Spawn `worker_count` workers onto the current tokio runtime.
    ///
    /// Workers probe `address` through `probe` and push every outcome into
    /// `sink`. Once `cancel` fires they stop taking new jobs; probes already
    /// in flight finish on their own timeout.
    pub fn start(
        queue: Arc<PortJobQueue>,
        sink: ResultCollector,
        worker_count: usize,
        probe: Arc<dyn PortProbe>,
        address: IpAddr,
        cancel: CancellationToken,
    ) -> Self {
        let mut workers = JoinSet::new();

        for id in 0..worker_count {
            let queue = Arc::clone(&queue);
            let probe = Arc::clone(&probe);
            let sink = sink.handle();
            let cancel = cancel.clone();

            workers.spawn(async move {
                let handled = run_worker(&queue, probe.as_ref(), address, &sink, &cancel).await;
                debug!(worker = id, handled, "worker finished");
            });
        }

        Self {
            workers,
            collector: sink,
            worker_count,
        }
    }

    /// Number of workers that were started.
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Wait for every worker to exit and hand the collector back.
    pub async fn await_completion(mut self) -> ResultCollector {
        while let Some(joined) = self.workers.join_next().await {
            if let Err(e) = joined {
                warn!(error = %e, "worker task ended abnormally");
            }
        }
        self.collector
    }
}

/// Worker body. Returns how many jobs this worker processed.
async fn run_worker(
    queue: &PortJobQueue,
    probe: &dyn PortProbe,
    address: IpAddr,
    sink: &ResultCollector,
    cancel: &CancellationToken,
) -> usize {
    let mut handled = 0;

    loop {
        if cancel.is_cancelled() {
            break;
        }
        let Some(job) = queue.next_job() else {
            break;
        };

        let bound = probe.timeout() + PROBE_SLACK;
        let attempt = AssertUnwindSafe(probe.probe(address, job.port)).catch_unwind();

        let outcome = match timeout(bound, attempt).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(panic)) => {
                let reason = panic_message(panic.as_ref());
                warn!(port = job.port, %reason, "probe panicked");
                let state = ProbeState::Error(format!("probe panicked: {}", reason));
                ProbeOutcome::new(job.port, state)
            }
            Err(_) => {
                let bound_ms = bound.as_millis() as u64;
                warn!(port = job.port, bound_ms, "probe overran its timeout");
                ProbeOutcome::new(job.port, ProbeState::Filtered)
            }
        };

        sink.record(outcome);
        handled += 1;
    }

    handled
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::traits::PortProbe;
    use crate::types::PortRange;
    use async_trait::async_trait;
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

    /// Deterministic probe: even ports open, odd closed, one port panics.
    /// Tracks the peak number of concurrent calls.
    #[derive(Default)]
    struct ScriptedProbe {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        panic_on: Option<u16>,
    }

    #[async_trait]
    impl PortProbe for ScriptedProbe {
        async fn probe(&self, _address: IpAddr, port: u16) -> ProbeOutcome {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(2)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if Some(port) == self.panic_on {
                panic!("scripted failure on {}", port);
            }
            let state = if port % 2 == 0 {
                ProbeState::Open
            } else {
                ProbeState::Closed
            };
            ProbeOutcome::new(port, state)
        }

        fn timeout(&self) -> Duration {
            Duration::from_millis(10)
        }
    }

    /// Never answers within its own declared timeout.
    struct StalledCheck;

    #[async_trait]
    impl PortProbe for StalledCheck {
        async fn probe(&self, _address: IpAddr, port: u16) -> ProbeOutcome {
            tokio::time::sleep(Duration::from_secs(3)).await;
            ProbeOutcome::new(port, ProbeState::Open)
        }

        fn timeout(&self) -> Duration {
            Duration::from_millis(50)
        }
    }

    async fn run(range: PortRange, workers: usize, probe: Arc<dyn PortProbe>) -> Vec<ProbeOutcome> {
        let queue = Arc::new(PortJobQueue::from_range(range));
        let pool = WorkerPool::start(
            queue,
            ResultCollector::new(),
            workers,
            probe,
            LOCALHOST,
            CancellationToken::new(),
        );
        let collector = pool.await_completion().await;
        let target = crate::types::Target::new("localhost", LOCALHOST);
        collector
            .finalize(target, range, chrono::Utc::now(), workers, false)
            .outcomes
    }

    #[test]
    fn test_pool_size() {
        assert_eq!(pool_size(100, 3), 3);
        assert_eq!(pool_size(100, 65536), 100);
        assert_eq!(pool_size(0, 10), 1);
    }

    #[tokio::test]
    async fn test_every_port_exactly_once() {
        let range = PortRange::new(1000, 1499).unwrap();
        let outcomes = run(range, 37, Arc::new(ScriptedProbe::default())).await;

        assert_eq!(outcomes.len(), 500);
        let ports: Vec<u16> = outcomes.iter().map(|o| o.port).collect();
        assert_eq!(ports, range.iter().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_single_and_many_workers_agree() {
        let range = PortRange::new(1, 200).unwrap();
        let one = run(range, 1, Arc::new(ScriptedProbe::default())).await;
        let many = run(range, 100, Arc::new(ScriptedProbe::default())).await;

        let pairs = |v: &[ProbeOutcome]| -> Vec<(u16, ProbeState)> {
            v.iter().map(|o| (o.port, o.state.clone())).collect()
        };
        assert_eq!(pairs(&one), pairs(&many));
    }

    #[tokio::test]
    async fn test_concurrency_never_exceeds_worker_count() {
        let probe = Arc::new(ScriptedProbe::default());
        run(PortRange::new(1, 300).unwrap(), 8, probe.clone()).await;

        assert!(probe.peak.load(Ordering::SeqCst) <= 8);
        assert_eq!(probe.in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_panicking_probe_does_not_abort_scan() {
        let probe = Arc::new(ScriptedProbe {
            panic_on: Some(42),
            ..Default::default()
        });
        let outcomes = run(PortRange::new(40, 44).unwrap(), 2, probe).await;

        assert_eq!(outcomes.len(), 5);
        assert!(matches!(
            outcomes[2].state,
            ProbeState::Error(ref r) if r.contains("scripted failure")
        ));
        assert_eq!(outcomes[4].state, ProbeState::Open);
    }

    #[tokio::test]
    async fn test_stalled_check_is_cut_off_as_filtered() {
        let started = std::time::Instant::now();
        let outcomes = run(PortRange::new(10, 13).unwrap(), 4, Arc::new(StalledCheck)).await;

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(outcomes.len(), 4);
        assert!(outcomes.iter().all(|o| o.state == ProbeState::Filtered));
    }

    #[tokio::test]
    async fn test_cancelled_pool_stops_dequeuing() {
        let queue = Arc::new(PortJobQueue::from_range(PortRange::new(1, 1000).unwrap()));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let pool = WorkerPool::start(
            Arc::clone(&queue),
            ResultCollector::new(),
            4,
            Arc::new(ScriptedProbe::default()),
            LOCALHOST,
            cancel,
        );
        assert_eq!(pool.worker_count(), 4);
        let collector = pool.await_completion().await;

        assert!(collector.is_empty());
        assert_eq!(queue.remaining(), 1000);
    }
}
