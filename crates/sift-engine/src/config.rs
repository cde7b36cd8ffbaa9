//! Run configuration and validation.
//!
//! [`SieveConfig`] is the builder-input for a sieve run.
//! [`validate()`](SieveConfig::validate) checks every structural invariant
//! before any worker is started, so configuration errors are reported once
//! and never race with worker startup.

use std::fmt;

use sift_core::{ConfigError, Partition, SegmentLayout};

/// Upper bound on workers per run.
pub const MAX_WORKERS: usize = 1024;

// ── Protocol ───────────────────────────────────────────────────────

/// How workers agree on the sequence of sieving primes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// The coordinator finds each next prime with its cursor and
    /// broadcasts it: one broadcast per sieving pass.
    #[default]
    Broadcast,
    /// The coordinator computes every prime up to `isqrt(N)` once and
    /// broadcasts the whole list; each worker then sieves from its private
    /// copy with no further communication until the reduction.
    Replicated,
}

impl Protocol {
    /// Short lowercase name, as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Broadcast => "broadcast",
            Self::Replicated => "replicated",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── SieveConfig ────────────────────────────────────────────────────

/// Complete configuration for one sieve run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SieveConfig {
    /// Count primes in `[2, bound]`.
    pub bound: u64,
    /// Number of workers. Default: 1.
    pub workers: usize,
    /// Prime cursor protocol. Default: [`Protocol::Broadcast`].
    pub protocol: Protocol,
    /// Segment storage layout. Default: [`SegmentLayout::Dense`].
    pub layout: SegmentLayout,
}

impl SieveConfig {
    /// Single-worker, broadcast, dense configuration for `bound`.
    pub fn new(bound: u64) -> Self {
        Self {
            bound,
            workers: 1,
            protocol: Protocol::default(),
            layout: SegmentLayout::default(),
        }
    }

    /// Set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the prime cursor protocol.
    pub fn with_protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Set the segment layout.
    pub fn with_layout(mut self, layout: SegmentLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Worker count in [1, MAX_WORKERS].
        if self.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.workers > MAX_WORKERS {
            return Err(ConfigError::WorkerCountTooLarge {
                workers: self.workers,
                max: MAX_WORKERS,
            });
        }
        // 2. Coordinator holds every sieving prime.
        Partition::check_coordinator_coverage(self.bound, self.workers)?;
        // 3. Every segment is addressable. Sizes differ by at most one, and
        //    the last worker always gets the larger share.
        let last = self.workers - 1;
        let widest = Partition::all(self.bound, self.workers)?
            .get(last)
            .copied()
            .ok_or(ConfigError::NoWorkers)?;
        widest.segment_len()?;
        Ok(())
    }
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
