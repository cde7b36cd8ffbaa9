//! Core types for the sift partitioned prime sieve.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by every other crate in the workspace: worker ranks,
//! the range partition of `[2, N]`, segment storage layouts, and the
//! configuration and allocation error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod layout;
pub mod partition;

pub use error::{AllocationError, ConfigError};
pub use id::WorkerRank;
pub use layout::SegmentLayout;
pub use partition::{
    largest_sieving_prime, prime_square_within, sieving_limit, Partition, FIRST_VALUE,
};
