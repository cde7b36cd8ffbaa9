//! The [`Communicator`] trait: SPMD collectives seen from one worker.

use sift_core::WorkerRank;

use crate::error::CollectiveError;

/// One worker's handle onto the collective operations of its run.
///
/// Every worker in a run must issue the same sequence of collective calls;
/// a worker that calls `broadcast` while a peer calls `reduce_sum` is a
/// protocol bug and surfaces as [`CollectiveError::UnexpectedMessage`].
/// The coordinator (rank 0) is the root of every broadcast and reduction.
pub trait Communicator {
    /// This worker's rank.
    fn rank(&self) -> WorkerRank;

    /// Number of workers in the run.
    fn size(&self) -> usize;

    /// Whether this worker is the coordinator.
    fn is_coordinator(&self) -> bool {
        self.rank().is_coordinator()
    }

    /// Block until every worker has entered the barrier.
    fn barrier(&self) -> Result<(), CollectiveError>;

    /// Distribute the coordinator's `value` to every worker.
    ///
    /// Non-coordinators' `value` argument is ignored; every worker returns
    /// the coordinator's value.
    fn broadcast(&self, value: u64) -> Result<u64, CollectiveError>;

    /// Distribute the coordinator's `values` to every worker.
    ///
    /// Same contract as [`broadcast`](Self::broadcast), for a whole list.
    fn broadcast_list(&self, values: Vec<u64>) -> Result<Vec<u64>, CollectiveError>;

    /// Sum every worker's `value` at the coordinator.
    ///
    /// Returns `Some(total)` on the coordinator and `None` everywhere else.
    fn reduce_sum(&self, value: u64) -> Result<Option<u64>, CollectiveError>;
}
