//! Shared FIFO of ports waiting to be probed.
//!
//! Filled once, drained concurrently. Dequeue takes a mutex so each job is
//! handed to exactly one worker; the lock is never held across an await.

use super::traits::ScanJob;
use crate::types::PortRange;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// Work queue holding one [`ScanJob`] per port of a range.
#[derive(Debug)]
pub struct PortJobQueue {
    jobs: Mutex<VecDeque<ScanJob>>,
}

impl PortJobQueue {
    /// Build a queue with one job per port in `range`, ascending.
    pub fn from_range(range: PortRange) -> Self {
        let jobs: VecDeque<ScanJob> = range.iter().map(|port| ScanJob { port }).collect();
        Self {
            jobs: Mutex::new(jobs),
        }
    }

    /// Take the next job, or `None` once the queue is exhausted.
    pub fn next_job(&self) -> Option<ScanJob> {
        self.lock().pop_front()
    }

    /// Jobs not yet handed out.
    pub fn remaining(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    // A panic while holding this lock can only come from VecDeque itself,
    // which leaves the deque intact, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, VecDeque<ScanJob>> {
        self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
