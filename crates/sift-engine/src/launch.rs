//! Starting a run's workers and collecting their result.
//!
//! A single-worker run executes inline on the calling thread over a
//! [`SoloComm`]. Larger runs spawn one named OS thread per rank, each
//! owning one endpoint of a [`ChannelComm`] world; workers share nothing
//! else.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use sift_comm::{ChannelComm, Communicator, SoloComm};
use sift_core::{SegmentLayout, WorkerRank};
use tracing::{info, warn};

use crate::aggregate::GlobalCount;
use crate::config::{Protocol, SieveConfig};
use crate::error::SieveError;
use crate::metrics::RunMetrics;
use crate::worker::{run_worker, WorkerOutcome};

/// Result of a completed run, as reported by the coordinator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Primes were counted in `[2, bound]`.
    pub bound: u64,
    /// Number of workers that took part.
    pub workers: usize,
    /// Prime cursor protocol used.
    pub protocol: Protocol,
    /// Segment layout used.
    pub layout: SegmentLayout,
    /// Number of primes in `[2, bound]`.
    pub prime_count: GlobalCount,
    /// Coordinator's time between the start and end barriers.
    pub elapsed: Duration,
    /// Per-worker work counters.
    pub metrics: RunMetrics,
}

/// Validate `config`, run every worker to completion, and report.
///
/// Configuration errors are returned before any worker starts. If any
/// worker fails, the run fails: peers blocked in a collective observe the
/// failed worker's disconnect and stop too, and the error returned is the
/// root cause rather than one of those knock-on disconnects.
pub fn run(config: &SieveConfig) -> Result<RunReport, SieveError> {
    config.validate()?;
    info!(
        bound = config.bound,
        workers = config.workers,
        protocol = %config.protocol,
        layout = %config.layout,
        "starting sieve run"
    );

    let outcomes = if config.workers == 1 {
        vec![run_worker(&SoloComm::new(), config)?]
    } else {
        collect_outcomes(spawn_workers(config)?)?
    };

    let coordinator = outcomes.first().ok_or(SieveError::MissingGlobalCount)?;
    let prime_count = coordinator
        .global_count
        .ok_or(SieveError::MissingGlobalCount)?;
    let elapsed = coordinator.elapsed;
    info!(%prime_count, elapsed_us = elapsed.as_micros() as u64, "sieve run complete");

    Ok(RunReport {
        bound: config.bound,
        workers: config.workers,
        protocol: config.protocol,
        layout: config.layout,
        prime_count,
        elapsed,
        metrics: RunMetrics {
            workers: outcomes.into_iter().map(|o| o.metrics).collect(),
        },
    })
}

type WorkerHandle = (WorkerRank, JoinHandle<Result<WorkerOutcome, SieveError>>);

fn spawn_workers(config: &SieveConfig) -> Result<Vec<WorkerHandle>, SieveError> {
    let mut handles = Vec::with_capacity(config.workers);
    let mut world = ChannelComm::world(config.workers).into_iter();
    while let Some(comm) = world.next() {
        let rank = comm.rank();
        let cfg = config.clone();
        let spawned = thread::Builder::new()
            .name(format!("sift-worker-{rank}"))
            .spawn(move || run_worker(&comm, &cfg));
        match spawned {
            Ok(handle) => handles.push((rank, handle)),
            Err(e) => {
                // Drop every endpoint that has no thread yet so the started
                // workers unblock with a disconnect.
                warn!(%rank, error = %e, "worker spawn failed");
                drop(world);
                let _ = collect_outcomes(handles);
                return Err(SieveError::ThreadSpawnFailed {
                    rank,
                    reason: e.to_string(),
                });
            }
        }
    }
    Ok(handles)
}

/// Join every worker, then pick the error that explains the failure.
fn collect_outcomes(handles: Vec<WorkerHandle>) -> Result<Vec<WorkerOutcome>, SieveError> {
    let results: Vec<Result<WorkerOutcome, SieveError>> = handles
        .into_iter()
        .map(|(rank, handle)| {
            handle
                .join()
                .unwrap_or_else(|_| Err(SieveError::WorkerPanicked { rank }))
        })
        .collect();

    let mut outcomes = Vec::with_capacity(results.len());
    let mut root_cause: Option<SieveError> = None;
    for result in results {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                let replace = match &root_cause {
                    None => true,
                    Some(current) => current.is_knock_on() && !e.is_knock_on(),
                };
                if replace {
                    root_cause = Some(e);
                }
            }
        }
    }
    match root_cause {
        Some(e) => Err(e),
        None => Ok(outcomes),
    }
}
