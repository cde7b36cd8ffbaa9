//! Worker program and launcher for the sift partitioned prime sieve.
//!
//! A run splits `[2, N]` across `P` workers. Each worker sieves its own
//! slice; the workers agree on the sequence of sieving primes through one
//! of two [`Protocol`]s, and their counts are sum-reduced once at the
//! coordinator.
//!
//! # Architecture
//!
//! ```text
//! launch::run(config)
//!   validate ──► spawn P workers (SoloComm if P = 1, ChannelComm otherwise)
//!
//! worker::run_worker(comm, config)          one per rank
//!   Partition::new ──► barrier ──► allocate MarkedSegment
//!     ──► protocol (Sieving(p) ⇄ AdvancingCursor ──► Done)
//!     ──► aggregate::sum_counts ──► barrier
//!
//! launch::run
//!   join ──► root-cause error or coordinator's RunReport
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod config;
pub mod error;
pub mod launch;
pub mod metrics;
pub mod protocol;
pub mod worker;

pub use aggregate::{sum_counts, GlobalCount};
pub use config::{Protocol, SieveConfig, MAX_WORKERS};
pub use error::SieveError;
pub use launch::{run, RunReport};
pub use metrics::{RunMetrics, WorkerMetrics};
pub use protocol::{run_broadcast, run_replicated, ProtocolStats};
pub use worker::{run_worker, WorkerOutcome};
