//! The sparse half of a sparse set: a table indexed by identifier.

use alloc::vec::Vec;
use core::fmt;

use crate::packed_option::PackedOption;
use crate::{SparseId, SparseSetError};

/// A table mapping each identifier in `0..len` to an optional dense position.
///
/// Positions are stored in the identifier type itself, so a slot is the same
/// size as an identifier and an absent slot is the identifier type's reserved
/// maximum value. The table only ever grows: its length is the number of
/// identifiers the owning set supports.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SparseTable<K>
where
    K: SparseId,
{
    slots: Vec<PackedOption<K>>,
}

impl<K> SparseTable<K>
where
    K: SparseId,
{
    /// Create a new empty table which supports no identifiers.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Create a new table supporting identifiers with an index below
    /// `max_index`, all of them absent.
    #[inline]
    #[must_use]
    pub fn with_max_index(max_index: usize) -> Self {
        let mut table = Self::new();
        table.grow_to(max_index);
        table
    }

    /// Number of identifiers supported by the table.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the table supports no identifiers at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Grows the table to support identifiers with an index below
    /// `max_index`. New slots are absent and existing slots are untouched.
    ///
    /// Does nothing if the table is already large enough.
    ///
    /// Panics if `max_index` exceeds [`SparseId::MAX_INDEX`]: the reserved
    /// value would otherwise become a usable identifier.
    #[inline]
    #[track_caller]
    pub fn grow_to(&mut self, max_index: usize) {
        if self.slots.len() < max_index {
            assert!(
                max_index <= K::MAX_INDEX,
                "identifier space exhausted: {max_index} > {}",
                K::MAX_INDEX
            );
            self.slots.resize(max_index, PackedOption::none());
        }
    }

    /// Fallible version of [`SparseTable::grow_to`].
    ///
    /// Allocation failure is reported instead of aborting, and growing past
    /// the range of the identifier type is rejected in all builds.
    pub fn try_grow_to(&mut self, max_index: usize) -> Result<(), SparseSetError> {
        if self.slots.len() >= max_index {
            return Ok(());
        }
        if max_index > K::MAX_INDEX {
            return Err(SparseSetError::IdSpaceExhausted {
                requested: max_index,
                max: K::MAX_INDEX,
            });
        }
        self.slots
            .try_reserve_exact(max_index - self.slots.len())
            .map_err(|_| SparseSetError::AllocFailed)?;
        self.slots.resize(max_index, PackedOption::none());
        Ok(())
    }

    /// Returns the dense position recorded for `key`.
    ///
    /// Identifiers beyond the end of the table are simply absent.
    #[inline]
    #[must_use]
    pub fn get(&self, key: K) -> Option<usize> {
        self.slots
            .get(key.index())
            .and_then(|slot| slot.expand())
            .map(K::index)
    }

    /// Records `pos` as the dense position of `key`.
    ///
    /// Panics if `key` is beyond the end of the table.
    #[inline]
    #[track_caller]
    pub(crate) fn set(&mut self, key: K, pos: usize) {
        self.slots[key.index()] = K::new(pos).into();
    }

    /// Marks `key` as absent.
    ///
    /// Panics if `key` is beyond the end of the table.
    #[inline]
    #[track_caller]
    pub(crate) fn unset(&mut self, key: K) {
        self.slots[key.index()] = PackedOption::none();
    }

    /// Iterate over all present identifiers and their dense positions, in
    /// identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.expand().map(|pos| (K::new(idx), pos.index())))
    }
}

impl<K> Default for SparseTable<K>
where
    K: SparseId,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for SparseTable<K>
where
    K: SparseId,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(k, pos)| (k.index(), pos)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grow_is_monotonic() {
        let mut table = SparseTable::<u32>::with_max_index(4);
        assert_eq!(table.len(), 4);
        table.set(2, 0);
        table.grow_to(2);
        assert_eq!(table.len(), 4);
        table.grow_to(10);
        assert_eq!(table.len(), 10);
        assert_eq!(table.get(2), Some(0));
        assert_eq!(table.get(9), None);
        assert_eq!(table.get(10), None);
        assert_eq!(table.iter().collect::<Vec<_>>(), [(2, 0)]);
    }

    #[test]
    fn try_grow_rejects_reserved_range() {
        let mut table = SparseTable::<u8>::new();
        assert_eq!(table.try_grow_to(255), Ok(()));
        assert_eq!(table.len(), 255);
        assert_eq!(
            table.try_grow_to(256),
            Err(SparseSetError::IdSpaceExhausted {
                requested: 256,
                max: 255
            })
        );
        assert_eq!(table.len(), 255);
    }

    #[test]
    #[should_panic(expected = "identifier space exhausted: 300 > 255")]
    fn grow_past_reserved_range_panics() {
        let mut table = SparseTable::<u8>::new();
        table.grow_to(300);
    }
}
