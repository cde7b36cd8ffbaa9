//! Per-worker and per-run work counters.
//!
//! [`WorkerMetrics`] is filled in by each worker as it finishes;
//! [`RunMetrics`] collects them in rank order for the report. Nothing here
//! feeds back into the computation.

use sift_core::WorkerRank;

/// Work done by one worker.
///
/// Durations are in microseconds and cover the span between the two
/// barriers, so every worker's figure includes time spent waiting on
/// peers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkerMetrics {
    /// Worker these figures belong to.
    pub rank: WorkerRank,
    /// Sieving passes over the local segment.
    pub passes: u64,
    /// Broadcast collectives issued while sieving.
    pub broadcast_rounds: u64,
    /// Entries struck, counting re-strikes.
    pub struck: u64,
    /// Entries marked composite at the end.
    pub marked: u64,
    /// Bytes held by the segment buffer.
    pub segment_bytes: usize,
    /// Wall-clock time between the start and end barriers, in microseconds.
    pub elapsed_us: u64,
}

/// Every worker's metrics, indexed by rank.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// One entry per worker, in rank order.
    pub workers: Vec<WorkerMetrics>,
}

impl RunMetrics {
    /// Sieving passes summed over all workers.
    pub fn total_passes(&self) -> u64 {
        self.workers.iter().map(|w| w.passes).sum()
    }

    /// Entries struck summed over all workers.
    pub fn total_struck(&self) -> u64 {
        self.workers.iter().map(|w| w.struck).sum()
    }

    /// Segment memory summed over all workers.
    pub fn total_segment_bytes(&self) -> usize {
        self.workers.iter().map(|w| w.segment_bytes).sum()
    }

    /// Slowest worker's elapsed time, in microseconds.
    pub fn max_elapsed_us(&self) -> u64 {
        self.workers.iter().map(|w| w.elapsed_us).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = WorkerMetrics::default();
        assert_eq!(m.rank, WorkerRank(0));
        assert_eq!(m.passes, 0);
        assert_eq!(m.broadcast_rounds, 0);
        assert_eq!(m.struck, 0);
        assert_eq!(m.marked, 0);
        assert_eq!(m.segment_bytes, 0);
        assert_eq!(m.elapsed_us, 0);
        assert_eq!(RunMetrics::default().max_elapsed_us(), 0);
    }

    #[test]
    fn totals_sum_over_workers() {
        let run = RunMetrics {
            workers: vec![
                WorkerMetrics {
                    rank: WorkerRank(0),
                    passes: 4,
                    struck: 60,
                    segment_bytes: 50,
                    elapsed_us: 12,
                    ..Default::default()
                },
                WorkerMetrics {
                    rank: WorkerRank(1),
                    passes: 4,
                    struck: 30,
                    segment_bytes: 49,
                    elapsed_us: 15,
                    ..Default::default()
                },
            ],
        };
        assert_eq!(run.total_passes(), 8);
        assert_eq!(run.total_struck(), 90);
        assert_eq!(run.total_segment_bytes(), 99);
        assert_eq!(run.max_elapsed_us(), 15);
    }
}
