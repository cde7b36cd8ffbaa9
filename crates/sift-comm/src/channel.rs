//! In-process collective world built on crossbeam channels.
//!
//! Links form a star rooted at the coordinator: each non-coordinator worker
//! has one bounded channel up to rank 0 and one bounded channel down from
//! it. Collectives are composed from those links:
//!
//! ```text
//! barrier     leaves --Arrive-->  root      root --Release--> leaves
//! broadcast                                 root --Value----> leaves
//! reduce_sum  leaves --Partial--> root (sums)
//! ```
//!
//! Each `ChannelComm` is moved into its worker thread. When a worker exits
//! (normally or on error) its endpoints drop, and a peer blocked on that
//! link gets [`CollectiveError::PeerDisconnected`] instead of waiting
//! forever.

use crossbeam_channel::{Receiver, Sender};
use sift_core::WorkerRank;
use tracing::trace;

use crate::collective::Communicator;
use crate::error::CollectiveError;
use crate::message::{Message, MessageKind};

/// Messages a link can buffer before the sender blocks.
///
/// Only the broadcast direction ever runs ahead of its reader, by at most a
/// few rounds, so a small bound keeps the coordinator in near-lockstep.
const LINK_CAPACITY: usize = 16;

/// One worker's endpoint into an in-process collective world.
pub struct ChannelComm {
    rank: WorkerRank,
    size: usize,
    link: Link,
}

enum Link {
    /// Coordinator: one link per other worker, in rank order.
    Root(Vec<LeafLink>),
    /// Any other worker: the link to the coordinator.
    Leaf {
        up: Sender<Message>,
        down: Receiver<Message>,
    },
}

struct LeafLink {
    rank: WorkerRank,
    tx: Sender<Message>,
    rx: Receiver<Message>,
}

impl ChannelComm {
    /// Build a world of `size` workers and return their endpoints in rank
    /// order. `size` must be at least 1.
    pub fn world(size: usize) -> Vec<ChannelComm> {
        let size = size.max(1);
        let mut root_links = Vec::with_capacity(size - 1);
        let mut leaves = Vec::with_capacity(size - 1);

        for r in 1..size {
            let rank = WorkerRank(r as u32);
            let (up_tx, up_rx) = crossbeam_channel::bounded(LINK_CAPACITY);
            let (down_tx, down_rx) = crossbeam_channel::bounded(LINK_CAPACITY);
            root_links.push(LeafLink {
                rank,
                tx: down_tx,
                rx: up_rx,
            });
            leaves.push(ChannelComm {
                rank,
                size,
                link: Link::Leaf {
                    up: up_tx,
                    down: down_rx,
                },
            });
        }

        let mut world = Vec::with_capacity(size);
        world.push(ChannelComm {
            rank: WorkerRank::COORDINATOR,
            size,
            link: Link::Root(root_links),
        });
        world.extend(leaves);
        world
    }
}

impl std::fmt::Debug for ChannelComm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelComm")
            .field("rank", &self.rank)
            .field("size", &self.size)
            .finish()
    }
}

fn send(tx: &Sender<Message>, to: WorkerRank, msg: Message) -> Result<(), CollectiveError> {
    tx.send(msg)
        .map_err(|_| CollectiveError::PeerDisconnected { rank: to })
}

fn recv(rx: &Receiver<Message>, from: WorkerRank) -> Result<Message, CollectiveError> {
    rx.recv()
        .map_err(|_| CollectiveError::PeerDisconnected { rank: from })
}

fn unexpected(from: WorkerRank, expected: MessageKind, got: &Message) -> CollectiveError {
    CollectiveError::UnexpectedMessage {
        from,
        expected,
        got: got.kind(),
    }
}

impl Communicator for ChannelComm {
    fn rank(&self) -> WorkerRank {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn barrier(&self) -> Result<(), CollectiveError> {
        trace!(rank = self.rank.0, "barrier");
        match &self.link {
            Link::Root(leaves) => {
                for leaf in leaves {
                    match recv(&leaf.rx, leaf.rank)? {
                        Message::Arrive => {}
                        other => return Err(unexpected(leaf.rank, MessageKind::Arrive, &other)),
                    }
                }
                for leaf in leaves {
                    send(&leaf.tx, leaf.rank, Message::Release)?;
                }
                Ok(())
            }
            Link::Leaf { up, down } => {
                let root = WorkerRank::COORDINATOR;
                send(up, root, Message::Arrive)?;
                match recv(down, root)? {
                    Message::Release => Ok(()),
                    other => Err(unexpected(root, MessageKind::Release, &other)),
                }
            }
        }
    }

    fn broadcast(&self, value: u64) -> Result<u64, CollectiveError> {
        match &self.link {
            Link::Root(leaves) => {
                for leaf in leaves {
                    send(&leaf.tx, leaf.rank, Message::Value(value))?;
                }
                Ok(value)
            }
            Link::Leaf { down, .. } => {
                let root = WorkerRank::COORDINATOR;
                match recv(down, root)? {
                    Message::Value(v) => Ok(v),
                    other => Err(unexpected(root, MessageKind::Value, &other)),
                }
            }
        }
    }

    fn broadcast_list(&self, values: Vec<u64>) -> Result<Vec<u64>, CollectiveError> {
        match &self.link {
            Link::Root(leaves) => {
                for leaf in leaves {
                    send(&leaf.tx, leaf.rank, Message::List(values.clone()))?;
                }
                Ok(values)
            }
            Link::Leaf { down, .. } => {
                let root = WorkerRank::COORDINATOR;
                match recv(down, root)? {
                    Message::List(v) => Ok(v),
                    other => Err(unexpected(root, MessageKind::List, &other)),
                }
            }
        }
    }

    fn reduce_sum(&self, value: u64) -> Result<Option<u64>, CollectiveError> {
        match &self.link {
            Link::Root(leaves) => {
                let mut total = value;
                for leaf in leaves {
                    match recv(&leaf.rx, leaf.rank)? {
                        Message::Partial(part) => {
                            total = total
                                .checked_add(part)
                                .ok_or(CollectiveError::ReductionOverflow)?;
                        }
                        other => return Err(unexpected(leaf.rank, MessageKind::Partial, &other)),
                    }
                }
                Ok(Some(total))
            }
            Link::Leaf { up, .. } => {
                send(up, WorkerRank::COORDINATOR, Message::Partial(value))?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::thread;

    /// Run `body` on every endpoint of a fresh world, one thread each, and
    /// collect the results in rank order.
    fn run_world<T, F>(size: usize, body: F) -> Vec<T>
    where
        T: Send + 'static,
        F: Fn(ChannelComm) -> T + Send + Sync + Clone + 'static,
    {
        let handles: Vec<_> = ChannelComm::world(size)
            .into_iter()
            .map(|comm| {
                let body = body.clone();
                thread::spawn(move || body(comm))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    }

    #[test]
    fn world_assigns_dense_ranks() {
        let world = ChannelComm::world(4);
        let ranks: Vec<_> = world.iter().map(|c| c.rank().0).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3]);
        assert!(world.iter().all(|c| c.size() == 4));
        assert!(world[0].is_coordinator());
    }

    #[test]
    fn world_of_zero_is_clamped_to_one() {
        let world = ChannelComm::world(0);
        assert_eq!(world.len(), 1);
        assert_eq!(world[0].size(), 1);
    }

    #[test]
    fn broadcast_delivers_coordinator_value() {
        let got = run_world(5, |comm| {
            let mine = u64::from(comm.rank().0) + 100;
            comm.broadcast(mine).unwrap()
        });
        assert_eq!(got, vec![100; 5]);
    }

    #[test]
    fn repeated_broadcasts_stay_in_order() {
        let got = run_world(3, |comm| {
            (0..200u64)
                .map(|round| comm.broadcast(round * 3).unwrap())
                .collect::<Vec<_>>()
        });
        let expected: Vec<u64> = (0..200).map(|r| r * 3).collect();
        for per_rank in got {
            assert_eq!(per_rank, expected);
        }
    }

    #[test]
    fn broadcast_list_copies_to_everyone() {
        let got = run_world(4, |comm| {
            let list = if comm.is_coordinator() {
                vec![2, 3, 5, 7]
            } else {
                Vec::new()
            };
            comm.broadcast_list(list).unwrap()
        });
        for list in got {
            assert_eq!(list, vec![2, 3, 5, 7]);
        }
    }

    #[test]
    fn reduce_sum_lands_on_coordinator_only() {
        let got = run_world(6, |comm| comm.reduce_sum(u64::from(comm.rank().0) + 1).unwrap());
        assert_eq!(got[0], Some(21));
        assert!(got[1..].iter().all(Option::is_none));
    }

    #[test]
    fn barrier_then_reduce_mixes_cleanly() {
        let got = run_world(3, |comm| {
            comm.barrier().unwrap();
            let total = comm.reduce_sum(10).unwrap();
            comm.barrier().unwrap();
            total
        });
        assert_eq!(got, vec![Some(30), None, None]);
    }

    #[test]
    fn mismatched_collectives_are_reported() {
        let mut world = ChannelComm::world(2);
        let leaf = world.pop().unwrap();
        let root = world.pop().unwrap();
        let t = thread::spawn(move || {
            let _ = leaf.reduce_sum(1);
            // Keep the link open until the root has read the partial.
            leaf
        });
        match root.barrier() {
            Err(CollectiveError::UnexpectedMessage {
                from,
                expected: MessageKind::Arrive,
                got: MessageKind::Partial,
            }) => assert_eq!(from, WorkerRank(1)),
            other => panic!("expected UnexpectedMessage, got {other:?}"),
        }
        drop(t.join().unwrap());
    }

    #[test]
    fn dropped_leaf_unblocks_coordinator() {
        let mut world = ChannelComm::world(3);
        drop(world.pop());
        let leaf = world.pop().unwrap();
        let root = world.pop().unwrap();
        let t = thread::spawn(move || leaf.barrier());
        match root.barrier() {
            Err(CollectiveError::PeerDisconnected { rank }) => assert_eq!(rank, WorkerRank(2)),
            other => panic!("expected PeerDisconnected, got {other:?}"),
        }
        drop(root);
        // The surviving leaf sees the coordinator vanish.
        assert!(t.join().unwrap().unwrap_err().is_disconnect());
    }

    #[test]
    fn dropped_coordinator_unblocks_leaves() {
        let mut world = ChannelComm::world(2);
        let leaf = world.pop().unwrap();
        drop(world);
        assert_eq!(
            leaf.broadcast(0),
            Err(CollectiveError::PeerDisconnected {
                rank: WorkerRank::COORDINATOR
            })
        );
    }

    // ── Property tests ───────────────────────────────────────────

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn reduce_sum_totals_every_rank(values in prop::collection::vec(0u64..1 << 40, 1..9)) {
            let expected: u64 = values.iter().sum();
            let size = values.len();
            let got = run_world(size, move |comm| {
                comm.reduce_sum(values[comm.rank().0 as usize]).unwrap()
            });
            prop_assert_eq!(got[0], Some(expected));
            prop_assert!(got[1..].iter().all(Option::is_none));
        }

        #[test]
        fn broadcast_list_matches_coordinator(
            list in prop::collection::vec(any::<u64>(), 0..300),
            size in 1usize..9,
        ) {
            let sent = list.clone();
            let got = run_world(size, move |comm| {
                let mine = if comm.is_coordinator() { sent.clone() } else { vec![1, 2, 3] };
                comm.broadcast_list(mine).unwrap()
            });
            for received in got {
                prop_assert_eq!(&received, &list);
            }
        }
    }
}
