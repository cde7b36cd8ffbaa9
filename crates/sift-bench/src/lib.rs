//! Benchmark profiles for the sift partitioned prime sieve.
//!
//! - [`reference_profile`]: N = 10^7, dense layout, broadcast protocol
//! - [`stress_profile`]: N = 10^8, odd-only layout, replicated protocol
//! - [`profile_matrix`]: every protocol/layout pairing at one bound

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use sift_core::SegmentLayout;
use sift_engine::{Protocol, SieveConfig};

/// Bound used by [`reference_profile`].
pub const REFERENCE_BOUND: u64 = 10_000_000;

/// Bound used by [`stress_profile`].
pub const STRESS_BOUND: u64 = 100_000_000;

/// Reference run: `10^7` with dense segments and one broadcast per prime.
pub fn reference_profile(workers: usize) -> SieveConfig {
    SieveConfig::new(REFERENCE_BOUND).with_workers(workers)
}

/// Stress run: `10^8` with half-size segments and a replicated prime list.
pub fn stress_profile(workers: usize) -> SieveConfig {
    SieveConfig::new(STRESS_BOUND)
        .with_workers(workers)
        .with_protocol(Protocol::Replicated)
        .with_layout(SegmentLayout::OddOnly)
}

/// All four protocol/layout combinations for `bound` and `workers`, with a
/// short label for each.
pub fn profile_matrix(bound: u64, workers: usize) -> Vec<(String, SieveConfig)> {
    let mut out = Vec::with_capacity(4);
    for protocol in [Protocol::Broadcast, Protocol::Replicated] {
        for layout in [SegmentLayout::Dense, SegmentLayout::OddOnly] {
            let cfg = SieveConfig::new(bound)
                .with_workers(workers)
                .with_protocol(protocol)
                .with_layout(layout);
            out.push((format!("{protocol}/{layout}"), cfg));
        }
    }
    out
}
