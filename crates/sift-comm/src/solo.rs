//! Communicator for a run with a single worker.

use sift_core::WorkerRank;

use crate::collective::Communicator;
use crate::error::CollectiveError;

/// The only worker of a one-worker run.
///
/// Every collective returns immediately with the local value. Used when
/// `P = 1` so that the worker program needs no special casing beyond the
/// places where it skips collectives entirely.
#[derive(Clone, Copy, Debug, Default)]
pub struct SoloComm;

impl SoloComm {
    /// Create the single-worker communicator.
    pub fn new() -> Self {
        SoloComm
    }
}

impl Communicator for SoloComm {
    fn rank(&self) -> WorkerRank {
        WorkerRank::COORDINATOR
    }

    fn size(&self) -> usize {
        1
    }

    fn barrier(&self) -> Result<(), CollectiveError> {
        Ok(())
    }

    fn broadcast(&self, value: u64) -> Result<u64, CollectiveError> {
        Ok(value)
    }

    fn broadcast_list(&self, values: Vec<u64>) -> Result<Vec<u64>, CollectiveError> {
        Ok(values)
    }

    fn reduce_sum(&self, value: u64) -> Result<Option<u64>, CollectiveError> {
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solo_collectives_are_identity() {
        let comm = SoloComm::new();
        assert!(comm.is_coordinator());
        assert_eq!(comm.size(), 1);
        comm.barrier().unwrap();
        assert_eq!(comm.broadcast(7).unwrap(), 7);
        assert_eq!(comm.broadcast_list(vec![2, 3]).unwrap(), vec![2, 3]);
        assert_eq!(comm.reduce_sum(25).unwrap(), Some(25));
    }
}
