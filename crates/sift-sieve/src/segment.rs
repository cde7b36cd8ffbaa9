//! Per-worker composite flags.
//!
//! A [`MarkedSegment`] is allocated once per worker, owned exclusively by
//! it, mutated only by sieving passes, and dropped when the worker exits.
//! Entry `true` means "known composite".

use sift_core::{AllocationError, Partition, SegmentLayout};

/// Composite flags for one partition.
///
/// In the `Dense` layout entry `i` stands for `low_value + i`. In the
/// `OddOnly` layout entry `i` stands for `first_odd + 2 * i`, and the value
/// 2 (if inside the partition) is counted without being stored.
#[derive(Debug)]
pub struct MarkedSegment {
    partition: Partition,
    layout: SegmentLayout,
    base: u64,
    marks: Vec<bool>,
}

impl MarkedSegment {
    /// Reserve an all-unmarked segment for `partition`.
    ///
    /// Fails with [`AllocationError`] instead of aborting when the buffer
    /// cannot be reserved; an empty partition allocates nothing.
    pub fn allocate(partition: &Partition, layout: SegmentLayout) -> Result<Self, AllocationError> {
        let entries = layout.stored_entries(partition.low_value, partition.high_value);
        let len = usize::try_from(entries).map_err(|_| AllocationError {
            rank: partition.worker,
            bytes: usize::MAX,
        })?;

        let mut marks = Vec::new();
        marks
            .try_reserve_exact(len)
            .map_err(|_| AllocationError {
                rank: partition.worker,
                bytes: len,
            })?;
        marks.resize(len, false);

        Ok(Self {
            partition: *partition,
            layout,
            base: layout.first_stored(partition.low_value),
            marks,
        })
    }

    /// The partition this segment covers.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Storage layout.
    pub fn layout(&self) -> SegmentLayout {
        self.layout
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Bytes held by the flag buffer.
    pub fn bytes(&self) -> usize {
        self.marks.len() * std::mem::size_of::<bool>()
    }

    /// Value represented by entry `index`.
    pub fn value_at(&self, index: usize) -> u64 {
        self.base + index as u64 * self.layout.stride()
    }

    /// Entry holding `value`, if the layout stores it in this segment.
    pub fn index_of(&self, value: u64) -> Option<usize> {
        if !self.partition.contains(value) || value < self.base {
            return None;
        }
        let offset = value - self.base;
        if offset % self.layout.stride() != 0 {
            return None;
        }
        usize::try_from(offset / self.layout.stride())
            .ok()
            .filter(|&i| i < self.marks.len())
    }

    /// Whether entry `index` is known composite.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn is_marked(&self, index: usize) -> bool {
        self.marks[index]
    }

    /// Number of entries flagged composite.
    pub fn count_marked(&self) -> u64 {
        self.marks.iter().filter(|&&m| m).count() as u64
    }

    /// Primes in this segment once sieving is complete: unmarked entries
    /// plus any primes the layout counts without storing.
    pub fn count_unmarked(&self) -> u64 {
        let unmarked = self.marks.iter().filter(|&&m| !m).count() as u64;
        unmarked
            + self
                .layout
                .implicit_primes(self.partition.low_value, self.partition.high_value)
    }

    /// Values of the stored entries that are still unmarked, in order.
    pub fn unmarked_values(&self) -> impl Iterator<Item = u64> + '_ {
        self.marks
            .iter()
            .enumerate()
            .filter(|&(_, &m)| !m)
            .map(|(i, _)| self.value_at(i))
    }

    pub(crate) fn marks_mut(&mut self) -> &mut [bool] {
        &mut self.marks
    }

    pub(crate) fn base(&self) -> u64 {
        self.base
    }
}
