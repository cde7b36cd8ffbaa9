//! The program every worker runs.

use std::time::{Duration, Instant};

use sift_comm::Communicator;
use sift_core::Partition;
use sift_sieve::MarkedSegment;
use tracing::{debug, error};

use crate::aggregate::{sum_counts, GlobalCount};
use crate::config::{Protocol, SieveConfig};
use crate::error::SieveError;
use crate::metrics::WorkerMetrics;
use crate::protocol::{run_broadcast, run_replicated};

/// What one worker produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerOutcome {
    /// The worker's slice of `[2, N]`.
    pub partition: Partition,
    /// Primes found in that slice.
    pub local_count: u64,
    /// Primes in `[2, N]`; `Some` on the coordinator only.
    pub global_count: Option<GlobalCount>,
    /// Time from the start barrier to the end barrier.
    pub elapsed: Duration,
    /// Work counters.
    pub metrics: WorkerMetrics,
}

/// Run one worker of an SPMD sieve over `comm`.
///
/// The worker count and rank come from `comm`; `config.workers` is not
/// consulted. Every worker of the run must call this with the same
/// `bound`, `protocol` and `layout`.
///
/// The timed region is bracketed by two barriers, so the coordinator's
/// elapsed time covers the slowest worker.
pub fn run_worker<C: Communicator + ?Sized>(
    comm: &C,
    config: &SieveConfig,
) -> Result<WorkerOutcome, SieveError> {
    let rank = comm.rank();
    let workers = comm.size();
    let bound = config.bound;

    let partition = Partition::new(bound, workers, rank)?;
    Partition::check_coordinator_coverage(bound, workers)?;
    debug!(
        %rank,
        low = partition.low_value,
        high = partition.high_value,
        size = partition.segment_size,
        "partition"
    );

    comm.barrier().map_err(SieveError::collective(rank))?;
    let started = Instant::now();

    let mut segment = MarkedSegment::allocate(&partition, config.layout).map_err(|e| {
        error!(%rank, bytes = e.bytes, "segment allocation failed");
        SieveError::from(e)
    })?;

    let stats = match config.protocol {
        Protocol::Broadcast => run_broadcast(comm, &mut segment, bound)?,
        Protocol::Replicated => run_replicated(comm, &mut segment, bound)?,
    };

    let local_count = segment.count_unmarked();
    let global_count = sum_counts(comm, local_count).map_err(SieveError::collective(rank))?;

    comm.barrier().map_err(SieveError::collective(rank))?;
    let elapsed = started.elapsed();
    debug!(%rank, local_count, elapsed_us = elapsed.as_micros() as u64, "worker done");

    let metrics = WorkerMetrics {
        rank,
        passes: stats.passes,
        broadcast_rounds: stats.rounds,
        struck: stats.struck,
        marked: segment.count_marked(),
        segment_bytes: segment.bytes(),
        elapsed_us: elapsed.as_micros() as u64,
    };
    Ok(WorkerOutcome {
        partition,
        local_count,
        global_count,
        elapsed,
        metrics,
    })
}
