//! Storage layouts for a worker's marked segment.

use std::fmt;

/// How the values of a partition map onto marked-segment entries.
///
/// `Dense` stores one entry per value in `[low, high]`, indexed by
/// `value - low`. `OddOnly` stores one entry per odd value, indexed by
/// `(value - first_odd) / 2`, and counts the value 2 implicitly; it needs
/// half the memory and never sieves with 2.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SegmentLayout {
    /// One entry per integer.
    #[default]
    Dense,
    /// One entry per odd integer; evens are known composite except 2.
    OddOnly,
}

impl SegmentLayout {
    /// Prime the sieving loop starts with.
    pub fn first_sieving_prime(self) -> u64 {
        match self {
            Self::Dense => 2,
            Self::OddOnly => 3,
        }
    }

    /// Distance in values between adjacent stored entries.
    pub fn stride(self) -> u64 {
        match self {
            Self::Dense => 1,
            Self::OddOnly => 2,
        }
    }

    /// Value stored at index 0 of a segment starting at `low`.
    pub fn first_stored(self, low: u64) -> u64 {
        match self {
            Self::Dense => low,
            Self::OddOnly => low | 1,
        }
    }

    /// Number of entries needed to store `[low, high]`. Zero when empty.
    pub fn stored_entries(self, low: u64, high: u64) -> u64 {
        let first = self.first_stored(low);
        if low > high || first > high {
            return 0;
        }
        (high - first) / self.stride() + 1
    }

    /// Primes in `[low, high]` that this layout does not store but counts.
    pub fn implicit_primes(self, low: u64, high: u64) -> u64 {
        match self {
            Self::Dense => 0,
            Self::OddOnly => u64::from(low <= 2 && 2 <= high),
        }
    }

    /// Short lowercase name, as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dense => "dense",
            Self::OddOnly => "odd-only",
        }
    }
}

impl fmt::Display for SegmentLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_stores_every_value() {
        let l = SegmentLayout::Dense;
        assert_eq!(l.stored_entries(2, 100), 99);
        assert_eq!(l.stored_entries(5, 5), 1);
        assert_eq!(l.stored_entries(6, 5), 0);
        assert_eq!(l.implicit_primes(2, 100), 0);
    }

    #[test]
    fn odd_only_stores_odd_values() {
        let l = SegmentLayout::OddOnly;
        // 3, 5, ..., 99
        assert_eq!(l.first_stored(2), 3);
        assert_eq!(l.stored_entries(2, 100), 49);
        // 11, 13, 15
        assert_eq!(l.stored_entries(10, 15), 3);
        // [2, 2] holds nothing stored, but 2 is counted.
        assert_eq!(l.stored_entries(2, 2), 0);
        assert_eq!(l.implicit_primes(2, 2), 1);
        assert_eq!(l.implicit_primes(3, 9), 0);
    }

    #[test]
    fn first_sieving_prime_skips_two_for_odd_only() {
        assert_eq!(SegmentLayout::Dense.first_sieving_prime(), 2);
        assert_eq!(SegmentLayout::OddOnly.first_sieving_prime(), 3);
        assert_eq!(SegmentLayout::default(), SegmentLayout::Dense);
        assert_eq!(SegmentLayout::OddOnly.to_string(), "odd-only");
    }
}
