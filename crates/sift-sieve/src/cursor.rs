//! Next-prime discovery over a segment that starts at 2.

use crate::segment::MarkedSegment;
use sift_core::FIRST_VALUE;

/// Position of the current sieving prime inside a segment.
///
/// Only meaningful on a segment whose partition starts at 2 (the
/// coordinator's), and only if every prime up to the current one has
/// already been sieved out of it: then the next unmarked entry past the
/// cursor is the next prime. The cursor is plain local state, passed
/// explicitly between sieving passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimeCursor {
    index: usize,
    prime: u64,
}

impl PrimeCursor {
    /// Place the cursor on the layout's first sieving prime.
    ///
    /// If the segment does not store that prime (the range is too small),
    /// the cursor starts exhausted and [`advance`](Self::advance) returns
    /// `None`.
    pub fn new(segment: &MarkedSegment) -> Self {
        debug_assert!(
            segment.partition().is_empty() || segment.partition().low_value == FIRST_VALUE,
            "prime cursor needs a segment starting at 2"
        );
        let prime = segment.layout().first_sieving_prime();
        Self {
            index: segment.index_of(prime).unwrap_or(segment.len()),
            prime,
        }
    }

    /// Current sieving prime.
    pub fn prime(&self) -> u64 {
        self.prime
    }

    /// Entry index of the current prime.
    pub fn position(&self) -> usize {
        self.index
    }

    /// Step past marked entries to the next unmarked one and return its
    /// value, or `None` if the segment ends first.
    pub fn advance(&mut self, segment: &MarkedSegment) -> Option<u64> {
        let len = segment.len();
        let mut i = self.index.saturating_add(1);
        while i < len && segment.is_marked(i) {
            i += 1;
        }
        if i >= len {
            self.index = len;
            return None;
        }
        self.index = i;
        self.prime = segment.value_at(i);
        Some(self.prime)
    }
}
