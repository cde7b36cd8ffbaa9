//! Published values of the prime-counting function.

/// `(N, pi(N))` pairs, ascending by `N`.
pub const KNOWN_PRIME_COUNTS: &[(u64, u64)] = &[
    (0, 0),
    (1, 0),
    (2, 1),
    (3, 2),
    (10, 4),
    (25, 9),
    (100, 25),
    (1_000, 168),
    (10_000, 1_229),
    (100_000, 9_592),
    (1_000_000, 78_498),
    (10_000_000, 664_579),
];
