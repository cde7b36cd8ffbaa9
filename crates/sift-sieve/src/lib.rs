//! Local sieving for one worker's segment.
//!
//! - [`MarkedSegment`]: the per-worker composite flags, in either
//!   [`SegmentLayout`](sift_core::SegmentLayout).
//! - [`sieve_pass`]: one sieving pass for one prime (the local sieve engine).
//! - [`PrimeCursor`]: walks a segment that starts at 2 to find the next
//!   sieving prime after each pass.
//! - [`small_primes`]: every prime up to a limit, computed with the two
//!   pieces above.
//!
//! Nothing here communicates; cross-worker agreement on primes is the job
//! of `sift-engine`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cursor;
pub mod engine;
pub mod segment;
pub mod small_primes;

pub use cursor::PrimeCursor;
pub use engine::{first_multiple_offset, sieve_pass};
pub use segment::MarkedSegment;
pub use small_primes::small_primes;
