//! Error types detected before or during segment setup.
//!
//! Both kinds are fatal for the whole run: there is no partial-result mode
//! and no retry. Collective transport errors live in `sift-comm`, and the
//! run-level error that ties everything together lives in `sift-engine`.

use thiserror::Error;

use crate::id::WorkerRank;

/// Invalid run configuration.
///
/// Detected by validation before any worker starts, and reported once by
/// the caller rather than by every worker.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Zero workers were requested.
    #[error("worker count must be at least 1")]
    NoWorkers,
    /// More workers than the launcher supports.
    #[error("{workers} workers requested, at most {max} supported")]
    WorkerCountTooLarge {
        /// Requested worker count.
        workers: usize,
        /// Supported maximum.
        max: usize,
    },
    /// A rank outside `0..workers` was used to build a partition.
    #[error("worker rank {rank} out of range for {workers} workers")]
    RankOutOfRange {
        /// The offending rank.
        rank: WorkerRank,
        /// Number of workers in the run.
        workers: usize,
    },
    /// The coordinator's segment cannot hold every prime up to `sqrt(N)`.
    #[error(
        "too many workers for this bound: with {workers} workers the coordinator \
         segment ends at {coordinator_high}, below {needed_prime}, the largest prime up to \
         isqrt({bound}) = {sqrt_bound}"
    )]
    TooManyWorkers {
        /// Requested worker count.
        workers: usize,
        /// Sieving bound N.
        bound: u64,
        /// `high_value` of the coordinator's partition.
        coordinator_high: u64,
        /// Largest prime `<= isqrt(N)`; the coordinator must hold it.
        needed_prime: u64,
        /// `isqrt(N)`, the largest value a sieving prime can take.
        sqrt_bound: u64,
    },
    /// A segment has more entries than the platform can index.
    #[error("segment of {size} entries exceeds the addressable size")]
    SegmentTooLarge {
        /// Number of entries the segment would need.
        size: u64,
    },
}

/// The marked-segment buffer for one worker could not be reserved.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("worker {rank}: cannot allocate {bytes} bytes for its segment")]
pub struct AllocationError {
    /// Worker whose allocation failed.
    pub rank: WorkerRank,
    /// Size of the failed request.
    pub bytes: usize,
}
