//! One sieving pass over one segment.
//!
//! For a prime `p` and a segment starting at `low`, the first value to
//! strike is `p*p` when that already lies past `low`, otherwise the first
//! multiple of `p` at or after `low`. Everything below `p*p` that is a
//! multiple of `p` has a smaller prime factor and is struck by that
//! smaller prime's pass.

use crate::segment::MarkedSegment;
use sift_core::SegmentLayout;

/// Offset from `low` of the first value a pass with `prime` strikes.
///
/// Returns `None` when `prime * prime` overflows, which places the first
/// strike beyond every representable segment.
pub fn first_multiple_offset(low: u64, prime: u64) -> Option<u64> {
    let square = prime.checked_mul(prime)?;
    if square > low {
        return Some(square - low);
    }
    let rem = low % prime;
    Some(if rem == 0 { 0 } else { prime - rem })
}

/// Mark every multiple of `prime` in `segment` as composite.
///
/// Returns the number of entries struck (including ones already marked by
/// an earlier pass). Costs `O(len / prime)`. `prime` below 2 strikes
/// nothing; so does 2 in the `OddOnly` layout, which stores no evens.
pub fn sieve_pass(segment: &mut MarkedSegment, prime: u64) -> usize {
    if prime < 2 {
        return 0;
    }
    let Some(start) = first_marked_index(segment, prime) else {
        return 0;
    };
    // A stride wider than usize cannot land twice in one segment.
    let step = usize::try_from(prime).unwrap_or(usize::MAX);

    let marks = segment.marks_mut();
    let mut struck = 0;
    for flag in marks.iter_mut().skip(start).step_by(step) {
        *flag = true;
        struck += 1;
    }
    struck
}

impl MarkedSegment {
    /// Strike every multiple of `prime`; see [`sieve_pass`].
    pub fn sieve(&mut self, prime: u64) -> usize {
        sieve_pass(self, prime)
    }
}

/// Index of the first entry `sieve_pass` strikes, or `None` if the first
/// multiple falls past the end of the segment.
fn first_marked_index(segment: &MarkedSegment, prime: u64) -> Option<usize> {
    let partition = *segment.partition();
    if partition.is_empty() {
        return None;
    }
    let mut first = partition
        .low_value
        .checked_add(first_multiple_offset(partition.low_value, prime)?)?;

    if segment.layout() == SegmentLayout::OddOnly {
        if prime == 2 {
            return None;
        }
        // prime is odd, so one more step lands on an odd multiple.
        if first % 2 == 0 {
            first = first.checked_add(prime)?;
        }
    }
    if first > partition.high_value {
        return None;
    }
    let index = (first - segment.base()) / segment.layout().stride();
    usize::try_from(index).ok().filter(|&i| i < segment.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use sift_core::{Partition, WorkerRank};

    fn segment(low: u64, high: u64, layout: SegmentLayout) -> MarkedSegment {
        let p = Partition {
            worker: WorkerRank(0),
            low_value: low,
            high_value: high,
            segment_size: high + 1 - low,
        };
        MarkedSegment::allocate(&p, layout).unwrap()
    }

    fn marked_values(seg: &MarkedSegment) -> Vec<u64> {
        (0..seg.len())
            .filter(|&i| seg.is_marked(i))
            .map(|i| seg.value_at(i))
            .collect()
    }

    // ── first_multiple_offset ────────────────────────────────────

    #[test]
    fn offset_starts_at_square_when_square_is_past_low() {
        assert_eq!(first_multiple_offset(2, 2), Some(2));
        assert_eq!(first_multiple_offset(2, 3), Some(7));
        assert_eq!(first_multiple_offset(20, 5), Some(5));
    }

    #[test]
    fn offset_is_zero_on_exact_multiple() {
        assert_eq!(first_multiple_offset(30, 3), Some(0));
        assert_eq!(first_multiple_offset(49, 7), Some(0));
    }

    #[test]
    fn offset_rounds_up_to_next_multiple() {
        // 31 % 3 = 1, so next multiple is 33.
        assert_eq!(first_multiple_offset(31, 3), Some(2));
        assert_eq!(first_multiple_offset(101, 7), Some(4));
    }

    #[test]
    fn offset_overflowing_square_is_none() {
        assert_eq!(first_multiple_offset(2, u64::MAX), None);
    }

    // ── sieve_pass ───────────────────────────────────────────────

    #[test]
    fn dense_pass_marks_multiples_from_square() {
        let mut seg = segment(2, 30, SegmentLayout::Dense);
        let struck = sieve_pass(&mut seg, 3);
        assert_eq!(marked_values(&seg), vec![9, 12, 15, 18, 21, 24, 27, 30]);
        assert_eq!(struck, 8);
    }

    #[test]
    fn dense_pass_in_upper_segment() {
        let mut seg = segment(50, 70, SegmentLayout::Dense);
        sieve_pass(&mut seg, 7);
        assert_eq!(marked_values(&seg), vec![56, 63, 70]);
    }

    #[test]
    fn odd_only_pass_marks_odd_multiples() {
        let mut seg = segment(50, 100, SegmentLayout::OddOnly);
        sieve_pass(&mut seg, 7);
        assert_eq!(marked_values(&seg), vec![63, 77, 91]);
    }

    #[test]
    fn odd_only_ignores_two() {
        let mut seg = segment(2, 40, SegmentLayout::OddOnly);
        assert_eq!(sieve_pass(&mut seg, 2), 0);
        assert_eq!(seg.count_marked(), 0);
    }

    #[test]
    fn pass_past_segment_end_strikes_nothing() {
        let mut seg = segment(2, 20, SegmentLayout::Dense);
        assert_eq!(sieve_pass(&mut seg, 5), 0);
        let mut empty = segment(8, 7, SegmentLayout::Dense);
        assert_eq!(sieve_pass(&mut empty, 2), 0);
    }

    #[test]
    fn method_and_free_function_agree() {
        let mut a = segment(1_000, 2_000, SegmentLayout::Dense);
        let mut b = segment(1_000, 2_000, SegmentLayout::Dense);
        assert_eq!(a.sieve(13), sieve_pass(&mut b, 13));
        assert_eq!(marked_values(&a), marked_values(&b));
    }

    #[test]
    fn full_sieve_of_hundred_leaves_twenty_five() {
        for layout in [SegmentLayout::Dense, SegmentLayout::OddOnly] {
            let mut seg = segment(2, 100, layout);
            for p in [2, 3, 5, 7] {
                sieve_pass(&mut seg, p);
            }
            assert_eq!(seg.count_unmarked(), 25, "{layout}");
        }
    }

    // ── Property tests ───────────────────────────────────────────

    fn layout() -> impl Strategy<Value = SegmentLayout> {
        prop_oneof![Just(SegmentLayout::Dense), Just(SegmentLayout::OddOnly)]
    }

    proptest! {
        #[test]
        fn pass_marks_exactly_the_multiples_from_square(
            low in 2u64..3_000,
            len in 0u64..600,
            prime in prop::sample::select(vec![2u64, 3, 5, 7, 11, 13, 31, 59]),
            layout in layout(),
        ) {
            let high = low + len - 1;
            let mut seg = segment(low, high, layout);
            let struck = sieve_pass(&mut seg, prime);

            let expected: Vec<u64> = (low..=high)
                .filter(|v| v % prime == 0 && *v >= prime * prime)
                .filter(|v| layout == SegmentLayout::Dense || v % 2 == 1)
                .collect();
            prop_assert_eq!(struck, expected.len());
            prop_assert_eq!(marked_values(&seg), expected);
        }
    }
}
