//! Every prime up to a small limit.
//!
//! Used when the coordinator hands out the complete list of sieving primes
//! up front instead of one prime per round. The list is produced with the
//! same segment, pass and cursor machinery the workers run, over
//! `[2, limit]`.

use sift_core::{prime_square_within, AllocationError, Partition, SegmentLayout, WorkerRank};

use crate::cursor::PrimeCursor;
use crate::engine::sieve_pass;
use crate::segment::MarkedSegment;

/// All primes `<= limit`, ascending. `rank` is only used to attribute an
/// allocation failure.
pub fn small_primes(limit: u64, rank: WorkerRank) -> Result<Vec<u64>, AllocationError> {
    if limit < 2 {
        return Ok(Vec::new());
    }
    let partition = Partition {
        worker: rank,
        low_value: 2,
        high_value: limit,
        segment_size: limit - 1,
    };
    let mut segment = MarkedSegment::allocate(&partition, SegmentLayout::Dense)?;
    let mut cursor = PrimeCursor::new(&segment);

    let mut prime = cursor.prime();
    loop {
        sieve_pass(&mut segment, prime);
        match cursor.advance(&segment) {
            Some(next) if prime_square_within(next, limit) => prime = next,
            _ => break,
        }
    }
    Ok(segment.unmarked_values().collect())
}
