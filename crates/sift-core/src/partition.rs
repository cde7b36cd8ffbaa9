//! Near-equal split of `[2, N]` across a fixed set of workers.
//!
//! Worker `r` of `P` owns
//!
//! ```text
//! low_value  = 2 + r*(N-1)/P
//! high_value = 1 + (r+1)*(N-1)/P
//! ```
//!
//! with floor division. Consecutive workers share the boundary term, so the
//! segments tile `[2, N]` with no gaps or overlaps whatever the remainder of
//! `(N-1)/P`, and the last worker always ends at `N`. When `P > N-1` some
//! segments come out empty (`high_value = low_value - 1`); callers treat
//! those as zero-length, never as errors.

use std::ops::RangeInclusive;

use crate::error::ConfigError;
use crate::id::WorkerRank;

/// Smallest value any segment can hold.
pub const FIRST_VALUE: u64 = 2;

/// Largest value a sieving prime for `bound` can take: `isqrt(bound)`.
pub fn sieving_limit(bound: u64) -> u64 {
    bound.isqrt()
}

/// Whether `prime * prime <= bound`, treating overflow as "no".
pub fn prime_square_within(prime: u64, bound: u64) -> bool {
    prime
        .checked_mul(prime)
        .is_some_and(|square| square <= bound)
}

/// Largest prime `<= isqrt(bound)`, or `None` when `bound < 4`.
///
/// This is the last prime any segment is ever sieved with.
pub fn largest_sieving_prime(bound: u64) -> Option<u64> {
    (FIRST_VALUE..=sieving_limit(bound))
        .rev()
        .find(|&n| is_small_prime(n))
}

// Trial division over 6k +/- 1. Only called with `n <= 2^32`.
fn is_small_prime(n: u64) -> bool {
    if n < 4 {
        return n >= 2;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5u64;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// One worker's contiguous slice of `[2, N]`.
///
/// Created once at startup from the bound, worker count and rank, and
/// immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Partition {
    /// Rank that owns this slice.
    pub worker: WorkerRank,
    /// First value in the slice.
    pub low_value: u64,
    /// Last value in the slice; `low_value - 1` when the slice is empty.
    pub high_value: u64,
    /// `high_value - low_value + 1`.
    pub segment_size: u64,
}

impl Partition {
    /// Compute the slice of `[2, bound]` owned by `rank` out of `workers`.
    ///
    /// Bounds below 2 are accepted and produce empty slices everywhere.
    pub fn new(bound: u64, workers: usize, rank: WorkerRank) -> Result<Self, ConfigError> {
        if workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if rank.index() >= workers {
            return Err(ConfigError::RankOutOfRange { rank, workers });
        }
        let r = u64::from(rank.0);
        let low_value = FIRST_VALUE + boundary(bound, workers, r);
        let high_value = 1 + boundary(bound, workers, r + 1);
        Ok(Self {
            worker: rank,
            low_value,
            high_value,
            segment_size: high_value + 1 - low_value,
        })
    }

    /// The coordinator's slice.
    pub fn coordinator(bound: u64, workers: usize) -> Result<Self, ConfigError> {
        Self::new(bound, workers, WorkerRank::COORDINATOR)
    }

    /// Every worker's slice, in rank order.
    pub fn all(bound: u64, workers: usize) -> Result<Vec<Self>, ConfigError> {
        (0..workers)
            .map(|r| {
                let rank = u32::try_from(r).map_err(|_| ConfigError::RankOutOfRange {
                    rank: WorkerRank(u32::MAX),
                    workers,
                })?;
                Self::new(bound, workers, WorkerRank(rank))
            })
            .collect()
    }

    /// Check that the coordinator's slice contains every prime up to
    /// `sqrt(bound)`, the only primes any slice is ever sieved with.
    ///
    /// Only the largest such prime matters: the slice may end anywhere at
    /// or after it, even below `isqrt(bound)` itself.
    pub fn check_coordinator_coverage(bound: u64, workers: usize) -> Result<(), ConfigError> {
        let coordinator = Self::coordinator(bound, workers)?;
        let Some(needed_prime) = largest_sieving_prime(bound) else {
            return Ok(());
        };
        if coordinator.high_value < needed_prime {
            return Err(ConfigError::TooManyWorkers {
                workers,
                bound,
                coordinator_high: coordinator.high_value,
                needed_prime,
                sqrt_bound: sieving_limit(bound),
            });
        }
        Ok(())
    }

    /// Whether the slice holds no values.
    pub fn is_empty(&self) -> bool {
        self.segment_size == 0
    }

    /// Whether `value` falls inside the slice.
    pub fn contains(&self, value: u64) -> bool {
        self.low_value <= value && value <= self.high_value
    }

    /// The values in the slice.
    pub fn values(&self) -> RangeInclusive<u64> {
        self.low_value..=self.high_value
    }

    /// `segment_size` as an in-memory length.
    pub fn segment_len(&self) -> Result<usize, ConfigError> {
        usize::try_from(self.segment_size).map_err(|_| ConfigError::SegmentTooLarge {
            size: self.segment_size,
        })
    }
}

/// `floor(r * (bound - 1) / workers)`, widened so the product cannot overflow.
fn boundary(bound: u64, workers: usize, r: u64) -> u64 {
    let span = u128::from(bound.saturating_sub(1));
    // r <= workers, so the quotient never exceeds span.
    (u128::from(r) * span / workers as u128) as u64
}
