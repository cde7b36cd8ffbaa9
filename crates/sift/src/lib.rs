//! sift: a partitioned, collectively synchronized Sieve of Eratosthenes.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all sift sub-crates, and ships the `sift` command-line tool.
//!
//! # Quick start
//!
//! ```rust
//! use sift::prelude::*;
//!
//! let config = SieveConfig::new(100)
//!     .with_workers(3)
//!     .with_protocol(Protocol::Replicated)
//!     .with_layout(SegmentLayout::OddOnly);
//! let report = run(&config).unwrap();
//! assert_eq!(report.prime_count, GlobalCount(25));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `sift-core` | Worker ranks, partitions, layouts, config and allocation errors |
//! | [`comm`] | `sift-comm` | `Communicator` trait, single-worker and channel-backed worlds |
//! | [`sieve`] | `sift-sieve` | Marked segments, sieving passes, prime cursor, small primes |
//! | [`engine`] | `sift-engine` | Run configuration, protocols, worker program, launcher |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Ranks, partitions and layouts (`sift-core`).
///
/// [`types::Partition`] splits `[2, N]` across workers;
/// [`types::SegmentLayout`] chooses dense or odd-only storage.
pub use sift_core as types;

/// Collective operations (`sift-comm`).
///
/// The [`comm::Communicator`] trait, implemented by [`comm::SoloComm`] for
/// one worker and [`comm::ChannelComm`] for an in-process world of threads.
pub use sift_comm as comm;

/// Local sieving (`sift-sieve`).
pub use sift_sieve as sieve;

/// Worker program and launcher (`sift-engine`).
///
/// [`engine::run`] validates a [`engine::SieveConfig`], runs every worker
/// and returns the coordinator's [`engine::RunReport`].
pub use sift_engine as engine;

/// Common imports for typical sift usage.
///
/// ```rust
/// use sift::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use sift_core::{Partition, SegmentLayout, WorkerRank};

    // Errors
    pub use sift_comm::CollectiveError;
    pub use sift_core::{AllocationError, ConfigError};
    pub use sift_engine::SieveError;

    // Collectives
    pub use sift_comm::{ChannelComm, Communicator, SoloComm};

    // Engine
    pub use sift_engine::{
        run, run_worker, GlobalCount, Protocol, RunMetrics, RunReport, SieveConfig,
        WorkerMetrics,
    };
}
