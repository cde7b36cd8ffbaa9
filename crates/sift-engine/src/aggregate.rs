//! Sum of local prime counts.

use std::fmt;

use sift_comm::{CollectiveError, Communicator};

/// Number of primes in `[2, N]`, as held by the coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlobalCount(pub u64);

impl fmt::Display for GlobalCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sum every worker's `local` count at the coordinator.
///
/// Every worker must call this exactly once. Returns the total on the
/// coordinator and `None` on every other worker. A single-worker run
/// returns its own count without a collective.
pub fn sum_counts<C: Communicator + ?Sized>(
    comm: &C,
    local: u64,
) -> Result<Option<GlobalCount>, CollectiveError> {
    if comm.size() == 1 {
        return Ok(Some(GlobalCount(local)));
    }
    Ok(comm.reduce_sum(local)?.map(GlobalCount))
}
