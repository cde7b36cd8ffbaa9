//! Wire messages exchanged over a [`ChannelComm`](crate::ChannelComm) link.

use std::fmt;

/// A message on a coordinator link. Payloads travel by value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Message {
    /// Worker reached a barrier.
    Arrive,
    /// Coordinator releases a barrier.
    Release,
    /// Single broadcast value.
    Value(u64),
    /// Broadcast list.
    List(Vec<u64>),
    /// Contribution to a sum-reduction.
    Partial(u64),
}

impl Message {
    pub(crate) fn kind(&self) -> MessageKind {
        match self {
            Self::Arrive => MessageKind::Arrive,
            Self::Release => MessageKind::Release,
            Self::Value(_) => MessageKind::Value,
            Self::List(_) => MessageKind::List,
            Self::Partial(_) => MessageKind::Partial,
        }
    }
}

/// Payload-free tag of a link message, used in error reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// Barrier arrival.
    Arrive,
    /// Barrier release.
    Release,
    /// Single-value broadcast.
    Value,
    /// List broadcast.
    List,
    /// Reduction contribution.
    Partial,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Arrive => "barrier arrival",
            Self::Release => "barrier release",
            Self::Value => "broadcast value",
            Self::List => "broadcast list",
            Self::Partial => "reduction partial",
        };
        f.write_str(name)
    }
}
