use async_trait::async_trait;
use portsweep::scanner::{run_scan_with_probe, PortProbe};
use portsweep::{run_scan, PortRange, ProbeOutcome, ProbeState, ScanConfig, ScanError};
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr, TcpListener as StdListener};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio_test::assert_ok;
use tokio_util::sync::CancellationToken;

const LOCALHOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Bind a listener whose two neighbouring ports are free, so the scan
/// should see closed / open / closed.
async fn listener_between_free_ports() -> (TcpListener, u16) {
    for _ in 0..50 {
        let listener = TcpListener::bind((LOCALHOST, 0)).await.unwrap();
        let port = listener.local_addr().unwrap().port();
        if port == 0 || port == u16::MAX {
            continue;
        }
        let below = StdListener::bind((LOCALHOST, port - 1));
        let above = StdListener::bind((LOCALHOST, port + 1));
        if below.is_ok() && above.is_ok() {
            return (listener, port);
        }
    }
    panic!("could not find a listener with free neighbouring ports");
}

#[derive(Default)]
struct CountingProbe {
    calls: AtomicUsize,
    delay: Duration,
}

#[async_trait]
impl PortProbe for CountingProbe {
    async fn probe(&self, _address: IpAddr, port: u16) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        ProbeOutcome::new(port, ProbeState::Filtered)
    }

    fn timeout(&self) -> Duration {
        self.delay
    }
}

#[tokio::test]
async fn closed_open_closed_around_listener() {
    let (_listener, port) = listener_between_free_ports().await;
    let range = PortRange::new(port - 1, port + 1).unwrap();
    let config = ScanConfig::new("127.0.0.1", range).with_timeout(Duration::from_secs(1));

    let report = assert_ok!(run_scan(config, CancellationToken::new()).await);

    let states: Vec<(u16, ProbeState)> = report.states().map(|(p, s)| (p, s.clone())).collect();
    assert_eq!(
        states,
        vec![
            (port - 1, ProbeState::Closed),
            (port, ProbeState::Open),
            (port + 1, ProbeState::Closed),
        ]
    );
    assert!(report.is_complete());
    assert!(!report.cancelled);
    assert_eq!(report.open(), vec![port]);
    // Pool is sized to the range, not the configured maximum.
    assert_eq!(report.worker_count, 3);
}

#[tokio::test]
async fn unresolvable_host_never_probes() {
    let probe = Arc::new(CountingProbe::default());
    let range = PortRange::new(1, 100).unwrap();
    let config = ScanConfig::new("this-host-does-not-exist.invalid", range);

    let result = run_scan_with_probe(config, probe.clone(), CancellationToken::new()).await;

    assert!(matches!(result, Err(ScanError::Resolution(_))));
    assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn one_worker_and_many_workers_agree() {
    let (_listener, port) = listener_between_free_ports().await;
    let start = port.saturating_sub(20);
    let end = port.saturating_add(20);
    let range = PortRange::new(start, end).unwrap();
    let timeout = Duration::from_millis(500);

    let single = run_scan(
        ScanConfig::new("127.0.0.1", range).with_workers(1).with_timeout(timeout),
        CancellationToken::new(),
    )
    .await
    .unwrap();
    let pooled = run_scan(
        ScanConfig::new("127.0.0.1", range).with_workers(100).with_timeout(timeout),
        CancellationToken::new(),
    )
    .await
    .unwrap();

    assert!(single.is_complete());
    assert!(pooled.is_complete());
    assert_eq!(single.outcomes.len(), range.len());
    assert!(single.open().contains(&port));
    assert!(pooled.open().contains(&port));

    let pairs = |r: &portsweep::ScanReport| -> Vec<(u16, String)> {
        r.outcomes.iter().map(|o| (o.port, o.state.label().to_string())).collect()
    };
    assert_eq!(pairs(&single), pairs(&pooled));
}

#[tokio::test]
async fn cancellation_stops_the_scan_early() {
    let probe = Arc::new(CountingProbe {
        calls: AtomicUsize::new(0),
        delay: Duration::from_millis(20),
    });
    let range = PortRange::new(1, 2000).unwrap();
    let config = ScanConfig::new("127.0.0.1", range).with_workers(4);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let report = run_scan_with_probe(config, probe.clone(), cancel).await.unwrap();

    assert!(report.cancelled);
    assert!(!report.is_complete());
    assert!(report.ports_scanned() < range.len());
    assert_eq!(report.ports_scanned(), probe.calls.load(Ordering::SeqCst));

    let unique: HashSet<u16> = report.outcomes.iter().map(|o| o.port).collect();
    assert_eq!(unique.len(), report.ports_scanned());
    assert!(report.outcomes.windows(2).all(|w| w[0].port < w[1].port));
}

#[tokio::test]
async fn full_range_is_complete_with_scripted_probe() {
    let probe = Arc::new(CountingProbe::default());
    let range = PortRange::new(0, 65535).unwrap();
    let config = ScanConfig::new("127.0.0.1", range).with_workers(100);

    let report = run_scan_with_probe(config, probe.clone(), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(report.ports_scanned(), 65536);
    assert_eq!(probe.calls.load(Ordering::SeqCst), 65536);
    assert!(report.is_complete());
    assert_eq!(report.filtered_ports, 65536);
}
