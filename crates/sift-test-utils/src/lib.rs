//! Test utilities and mock communicators for sift development.
//!
//! Provides an independent reference for prime counts ([`is_prime`],
//! [`reference_prime_count`], [`KNOWN_PRIME_COUNTS`]) and two
//! [`Communicator`](sift_comm::Communicator) doubles:
//! [`RecordingComm`] counts the collectives issued through it, and
//! [`FailingComm`] breaks after a fixed number of them.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod comm;
pub mod fixtures;

pub use comm::{CollectiveCounts, FailingComm, RecordingComm};
pub use fixtures::KNOWN_PRIME_COUNTS;

/// Trial-division primality test over `6k ± 1` candidates. Slow,
/// obviously correct.
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut d = 5;
    while d * d <= n {
        if n % d == 0 || n % (d + 2) == 0 {
            return false;
        }
        d += 6;
    }
    true
}

/// Number of primes `<= bound`, by trial division.
pub fn reference_prime_count(bound: u64) -> u64 {
    (2..=bound).filter(|&v| is_prime(v)).count() as u64
}
