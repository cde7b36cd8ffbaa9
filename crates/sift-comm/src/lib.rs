//! Collective operations for sift sieve workers.
//!
//! Workers never share memory. Everything that crosses a worker boundary
//! goes through one of the collectives on [`Communicator`]: a barrier, a
//! single-value broadcast, a list broadcast, or a sum-reduction. Each
//! collective blocks until every worker has reached the matching call.
//!
//! Two implementations are provided:
//!
//! - [`SoloComm`] for a run with exactly one worker, where every collective
//!   is the identity and nothing blocks;
//! - [`ChannelComm`] for in-process worlds of any size, built on bounded
//!   crossbeam channels in a star rooted at the coordinator.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod channel;
pub mod collective;
pub mod error;
pub mod message;
pub mod solo;

pub use channel::ChannelComm;
pub use collective::Communicator;
pub use error::CollectiveError;
pub use message::MessageKind;
pub use solo::SoloComm;
