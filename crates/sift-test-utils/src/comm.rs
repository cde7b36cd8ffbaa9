//! Communicator doubles for driving worker code without threads.

use std::cell::Cell;

use sift_comm::{CollectiveError, Communicator};
use sift_core::WorkerRank;

/// How many collectives of each kind went through a [`RecordingComm`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectiveCounts {
    pub barriers: usize,
    pub broadcasts: usize,
    pub list_broadcasts: usize,
    pub reductions: usize,
}

impl CollectiveCounts {
    /// Collectives of any kind.
    pub fn total(&self) -> usize {
        self.barriers + self.broadcasts + self.list_broadcasts + self.reductions
    }
}

/// Forwards to an inner communicator and counts every call.
pub struct RecordingComm<C> {
    inner: C,
    counts: Cell<CollectiveCounts>,
}

impl<C: Communicator> RecordingComm<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            counts: Cell::new(CollectiveCounts::default()),
        }
    }

    /// Snapshot of the counters.
    pub fn counts(&self) -> CollectiveCounts {
        self.counts.get()
    }

    fn bump(&self, f: impl FnOnce(&mut CollectiveCounts)) {
        let mut c = self.counts.get();
        f(&mut c);
        self.counts.set(c);
    }
}

impl<C: Communicator> Communicator for RecordingComm<C> {
    fn rank(&self) -> WorkerRank {
        self.inner.rank()
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn barrier(&self) -> Result<(), CollectiveError> {
        self.bump(|c| c.barriers += 1);
        self.inner.barrier()
    }

    fn broadcast(&self, value: u64) -> Result<u64, CollectiveError> {
        self.bump(|c| c.broadcasts += 1);
        self.inner.broadcast(value)
    }

    fn broadcast_list(&self, values: Vec<u64>) -> Result<Vec<u64>, CollectiveError> {
        self.bump(|c| c.list_broadcasts += 1);
        self.inner.broadcast_list(values)
    }

    fn reduce_sum(&self, value: u64) -> Result<Option<u64>, CollectiveError> {
        self.bump(|c| c.reductions += 1);
        self.inner.reduce_sum(value)
    }
}

/// Behaves like a lone worker of a `size`-worker run for `budget`
/// collectives, then reports the coordinator as disconnected.
///
/// While healthy, broadcasts echo the local value and reductions return
/// the local value on the coordinator.
pub struct FailingComm {
    rank: WorkerRank,
    size: usize,
    remaining: Cell<usize>,
}

impl FailingComm {
    pub fn new(rank: WorkerRank, size: usize, budget: usize) -> Self {
        Self {
            rank,
            size,
            remaining: Cell::new(budget),
        }
    }

    fn spend(&self) -> Result<(), CollectiveError> {
        match self.remaining.get() {
            0 => Err(CollectiveError::PeerDisconnected {
                rank: if self.rank.is_coordinator() {
                    WorkerRank(1)
                } else {
                    WorkerRank::COORDINATOR
                },
            }),
            n => {
                self.remaining.set(n - 1);
                Ok(())
            }
        }
    }
}

impl Communicator for FailingComm {
    fn rank(&self) -> WorkerRank {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn barrier(&self) -> Result<(), CollectiveError> {
        self.spend()
    }

    fn broadcast(&self, value: u64) -> Result<u64, CollectiveError> {
        self.spend().map(|()| value)
    }

    fn broadcast_list(&self, values: Vec<u64>) -> Result<Vec<u64>, CollectiveError> {
        self.spend().map(|()| values)
    }

    fn reduce_sum(&self, value: u64) -> Result<Option<u64>, CollectiveError> {
        self.spend()
            .map(|()| self.rank.is_coordinator().then_some(value))
    }
}
