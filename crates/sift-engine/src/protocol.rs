//! Agreeing on the sequence of sieving primes.
//!
//! Both protocols drive the same state machine on every worker:
//!
//! ```text
//! Sieving(p) ──pass──► AdvancingCursor ──next p with p*p <= N──► Sieving(p)
//!                              │
//!                              └──otherwise──► Done
//! ```
//!
//! They differ only in where the next prime comes from. Under
//! [`Protocol::Broadcast`](crate::Protocol::Broadcast) the coordinator
//! advances its cursor and broadcasts the result every round. Under
//! [`Protocol::Replicated`](crate::Protocol::Replicated) the coordinator
//! broadcasts every sieving prime once, up front, and each worker then
//! walks its own copy.
//!
//! Every worker evaluates the termination test on the same value, so all
//! workers issue the same number of collectives and leave the loop
//! together.

use sift_comm::Communicator;
use sift_core::{prime_square_within, sieving_limit, SegmentLayout, FIRST_VALUE};
use sift_sieve::{sieve_pass, small_primes, MarkedSegment, PrimeCursor};
use tracing::{debug, trace};

use crate::error::SieveError;

/// Work done by one worker's sieving loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProtocolStats {
    /// Sieving passes run over the local segment.
    pub passes: u64,
    /// Broadcast collectives issued by the protocol.
    pub rounds: u64,
    /// Entries struck, counting re-strikes of already marked entries.
    pub struck: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Sieving(u64),
    AdvancingCursor,
    Done,
}

/// Run the loop until `next_prime` yields nothing usable.
fn drive<F>(
    segment: &mut MarkedSegment,
    first: Option<u64>,
    bound: u64,
    mut next_prime: F,
) -> Result<ProtocolStats, SieveError>
where
    F: FnMut(&MarkedSegment, &mut ProtocolStats) -> Result<Option<u64>, SieveError>,
{
    let rank = segment.partition().worker;
    let mut stats = ProtocolStats::default();
    let mut state = first.map_or(State::Done, State::Sieving);
    loop {
        state = match state {
            State::Sieving(prime) => {
                let struck = sieve_pass(segment, prime);
                trace!(%rank, prime, struck, "sieving pass");
                stats.struck += struck as u64;
                stats.passes += 1;
                State::AdvancingCursor
            }
            State::AdvancingCursor => match next_prime(&*segment, &mut stats)? {
                Some(next) if next >= FIRST_VALUE && prime_square_within(next, bound) => {
                    State::Sieving(next)
                }
                _ => State::Done,
            },
            State::Done => break,
        };
    }
    debug!(%rank, passes = stats.passes, rounds = stats.rounds, "sieving done");
    Ok(stats)
}

/// Sieve `segment` with one coordinator broadcast per prime.
///
/// Every worker sieves the layout's first prime unconditionally. After
/// each pass the coordinator advances its cursor over its own (already
/// sieved) segment and broadcasts the next unmarked value, or
/// `isqrt(bound) + 1` if its segment is exhausted; no broadcast happens in
/// a single-worker run.
pub fn run_broadcast<C: Communicator + ?Sized>(
    comm: &C,
    segment: &mut MarkedSegment,
    bound: u64,
) -> Result<ProtocolStats, SieveError> {
    let rank = comm.rank();
    let solo = comm.size() == 1;
    let mut cursor = comm.is_coordinator().then(|| PrimeCursor::new(segment));
    let first = segment.layout().first_sieving_prime();

    drive(segment, Some(first), bound, |segment, stats| {
        let proposed = match cursor.as_mut() {
            Some(cursor) => cursor
                .advance(segment)
                .unwrap_or_else(|| sieving_limit(bound).saturating_add(1)),
            None => 0,
        };
        if solo {
            return Ok(Some(proposed));
        }
        stats.rounds += 1;
        let next = comm
            .broadcast(proposed)
            .map_err(SieveError::collective(rank))?;
        Ok(Some(next))
    })
}

/// Sieve `segment` from a replicated list of every sieving prime.
///
/// The coordinator computes all primes up to `isqrt(bound)` and broadcasts
/// the list once; a single-worker run skips the broadcast. The `OddOnly`
/// layout drops 2 from the list since it stores no even values.
pub fn run_replicated<C: Communicator + ?Sized>(
    comm: &C,
    segment: &mut MarkedSegment,
    bound: u64,
) -> Result<ProtocolStats, SieveError> {
    let rank = comm.rank();
    let mut rounds = 0;
    let mut primes = if comm.is_coordinator() {
        small_primes(sieving_limit(bound), rank)?
    } else {
        Vec::new()
    };
    if comm.size() > 1 {
        rounds += 1;
        primes = comm
            .broadcast_list(primes)
            .map_err(SieveError::collective(rank))?;
    }

    let skip_two = segment.layout() == SegmentLayout::OddOnly;
    let mut list = primes.into_iter().filter(|&p| !(skip_two && p == 2));
    let first = list.next();
    let mut stats = drive(segment, first, bound, |_, _| Ok(list.next()))?;
    stats.rounds = rounds;
    Ok(stats)
}
