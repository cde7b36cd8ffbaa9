//! Strongly-typed worker identifiers.

use std::fmt;

/// Rank of a worker within a fixed-size sieve run.
///
/// Ranks are dense, `0..workers`, and supplied by whatever launches the
/// workers. Rank 0 is the coordinator: it discovers sieving primes and is
/// the only worker that holds the global count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerRank(pub u32);

impl WorkerRank {
    /// The coordinator / reporting worker.
    pub const COORDINATOR: WorkerRank = WorkerRank(0);

    /// Whether this rank is the coordinator.
    pub fn is_coordinator(self) -> bool {
        self == Self::COORDINATOR
    }

    /// The rank as a `usize` index into per-worker tables.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WorkerRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for WorkerRank {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
