//! Errors raised inside a collective call.

use sift_core::WorkerRank;
use thiserror::Error;

use crate::message::MessageKind;

/// A collective could not complete.
///
/// Every variant is fatal for the run. A worker that hits one returns,
/// dropping its links, which in turn unblocks any peer still waiting on it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CollectiveError {
    /// The peer at the other end of a link has gone away.
    #[error("worker {rank} disconnected")]
    PeerDisconnected {
        /// Rank of the vanished peer.
        rank: WorkerRank,
    },
    /// A peer sent a message for a different collective than the one in
    /// progress.
    #[error("expected {expected} from worker {from}, got {got}")]
    UnexpectedMessage {
        /// Rank that sent the message.
        from: WorkerRank,
        /// What the current collective was waiting for.
        expected: MessageKind,
        /// What actually arrived.
        got: MessageKind,
    },
    /// The reduced sum does not fit in a `u64`.
    #[error("sum-reduction overflowed")]
    ReductionOverflow,
}

impl CollectiveError {
    /// Whether this error only reflects a failure that happened elsewhere.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, Self::PeerDisconnected { .. })
    }
}
