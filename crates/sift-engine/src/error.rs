//! Run-level error type.

use sift_comm::CollectiveError;
use sift_core::{AllocationError, ConfigError, WorkerRank};
use thiserror::Error;

/// Why a sieve run produced no count.
///
/// Every variant is fatal for the whole run; there are no retries and no
/// partial results.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SieveError {
    /// The configuration failed validation.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    /// A worker could not allocate its segment.
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    /// A collective failed on a worker.
    #[error("worker {rank}: {source}")]
    Collective {
        /// Worker that observed the failure.
        rank: WorkerRank,
        /// The underlying collective error.
        #[source]
        source: CollectiveError,
    },
    /// A worker thread panicked.
    #[error("worker {rank} panicked")]
    WorkerPanicked {
        /// Rank of the panicked worker.
        rank: WorkerRank,
    },
    /// A worker thread could not be started.
    #[error("could not spawn worker {rank}: {reason}")]
    ThreadSpawnFailed {
        /// Rank that was being spawned.
        rank: WorkerRank,
        /// Description from the OS.
        reason: String,
    },
    /// The coordinator finished without holding the global count.
    #[error("coordinator finished without a global count")]
    MissingGlobalCount,
}

impl SieveError {
    /// Wrap a collective error observed by `rank`.
    pub fn collective(rank: WorkerRank) -> impl FnOnce(CollectiveError) -> SieveError {
        move |source| SieveError::Collective { rank, source }
    }

    /// Whether this error is only the echo of a failure on another worker
    /// (a peer vanished mid-collective).
    pub fn is_knock_on(&self) -> bool {
        matches!(self, Self::Collective { source, .. } if source.is_disconnect())
    }
}
