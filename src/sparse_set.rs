//! Sparse mapping of identifiers to densely packed values.
//!
//! This module provides a `SparseSet` data structure which implements a sparse mapping from a
//! [`SparseId`] key to a value stored in a contiguous vector. This implementation is based on
//! the paper:
//!
//! > Briggs, Torczon, *An efficient representation for sparse sets*,
//! > ACM Letters on Programming Languages and Systems, Volume 2, Issue 1-4, March-Dec. 1993.

use alloc::vec::{self, Vec};
use core::ops::{Index, IndexMut};
use core::{fmt, iter, mem, slice};

use crate::{SparseId, SparseSetError, SparseTable};

/// A mapping from sparse identifiers to values stored without holes.
///
/// A `SparseSet<K, V>` consists of three parallel arrays:
///
/// - a sparse table indexed by identifier, holding the dense position of each
///   present identifier (see [`SparseTable`]),
/// - a dense vector of identifiers, holding the identifier owning each dense
///   position,
/// - a dense vector of values.
///
/// The dense vectors always hold exactly [`len`](Self::len) entries, so
/// [`as_slice`](Self::as_slice) iterates over live values only. Removing a
/// value moves the last value into its place, which keeps removal O(1) but
/// means that the dense order is not stable across removals.
///
/// # Supported identifiers
///
/// The sparse table only covers identifiers below
/// [`num_supported`](Self::num_supported). It must be grown explicitly with
/// [`grow_to`](Self::grow_to) before larger identifiers can be inserted; the
/// set never grows on its own.
///
/// # References
///
/// References returned by [`get`](Self::get), [`try_get`](Self::try_get) and
/// friends borrow the whole set, so they cannot be held across a call that
/// modifies it. This matters because both insertion (which may reallocate the
/// dense vector) and removal (which may move another value into the removed
/// slot) change where values live.
#[derive(Clone)]
pub struct SparseSet<K, V>
where
    K: SparseId,
{
    sparse: SparseTable<K>,
    dense_ids: Vec<K>,
    dense: Vec<V>,
}

impl<K, V> SparseSet<K, V>
where
    K: SparseId,
{
    /// Create a new empty set.
    ///
    /// The set must be grown with [`SparseSet::grow_to`] before any elements
    /// can be inserted.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sparse: SparseTable::new(),
            dense_ids: Vec::new(),
            dense: Vec::new(),
        }
    }

    /// Create a new set supporting identifiers with an index below
    /// `max_index`.
    #[inline]
    #[must_use]
    pub fn with_max_index(max_index: usize) -> Self {
        Self {
            sparse: SparseTable::with_max_index(max_index),
            dense_ids: Vec::new(),
            dense: Vec::new(),
        }
    }

    /// Grows the set to support identifiers with an index below `max_index`.
    ///
    /// Does nothing if the set already supports that many identifiers. The
    /// number of supported identifiers never decreases.
    ///
    /// Panics if `max_index` exceeds [`SparseId::MAX_INDEX`]. Use
    /// [`SparseSet::try_grow_to`] when the size comes from untrusted input.
    #[inline]
    #[track_caller]
    pub fn grow_to(&mut self, max_index: usize) {
        if max_index > self.sparse.len() {
            trace!("Growing sparse table from {} to {max_index}", self.sparse.len());
            self.sparse.grow_to(max_index);
        }
    }

    /// Fallible version of [`SparseSet::grow_to`].
    ///
    /// Returns [`SparseSetError::IdSpaceExhausted`] if `max_index` exceeds
    /// [`SparseId::MAX_INDEX`] and [`SparseSetError::AllocFailed`] if the
    /// sparse table could not be allocated. The set is unchanged on error.
    pub fn try_grow_to(&mut self, max_index: usize) -> Result<(), SparseSetError> {
        if max_index <= self.sparse.len() {
            return Ok(());
        }
        self.sparse.try_grow_to(max_index)?;
        trace!("Grew sparse table to {max_index}");
        Ok(())
    }

    /// Returns the number of identifiers supported by the set.
    #[inline]
    #[must_use]
    pub fn num_supported(&self) -> usize {
        self.sparse.len()
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Returns true if the set contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Returns the number of values the dense vector can hold without
    /// reallocating.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.dense.capacity()
    }

    /// Return `true` if the set contains a value for `key`.
    ///
    /// Identifiers beyond [`SparseSet::num_supported`] are reported as absent.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.sparse.get(key).is_some()
    }

    /// Return the position in the dense vector of the value for `key`.
    #[inline]
    #[must_use]
    pub fn dense_index_of(&self, key: K) -> Option<usize> {
        self.sparse.get(key)
    }

    /// Returns a reference to the value for `key`.
    ///
    /// Returns [`SparseSetError::InvalidId`] if `key` has no value, including
    /// when it is beyond the supported range. Use [`SparseSet::try_get`] when
    /// absence is expected.
    #[inline]
    pub fn get(&self, key: K) -> Result<&V, SparseSetError> {
        match self.sparse.get(key) {
            Some(pos) => Ok(&self.dense[pos]),
            None => Err(self.invalid_id(key)),
        }
    }

    /// Returns a mutable reference to the value for `key`.
    ///
    /// Fails in the same way as [`SparseSet::get`].
    #[inline]
    pub fn get_mut(&mut self, key: K) -> Result<&mut V, SparseSetError> {
        match self.sparse.get(key) {
            Some(pos) => Ok(&mut self.dense[pos]),
            None => Err(self.invalid_id(key)),
        }
    }

    /// Returns a reference to the value for `key`, or `None` if there is none.
    #[inline]
    #[must_use]
    pub fn try_get(&self, key: K) -> Option<&V> {
        let pos = self.sparse.get(key)?;
        Some(&self.dense[pos])
    }

    /// Returns a mutable reference to the value for `key`, or `None` if there
    /// is none.
    #[inline]
    pub fn try_get_mut(&mut self, key: K) -> Option<&mut V> {
        let pos = self.sparse.get(key)?;
        Some(&mut self.dense[pos])
    }

    fn invalid_id(&self, key: K) -> SparseSetError {
        SparseSetError::InvalidId {
            index: key.index(),
            num_supported: self.sparse.len(),
        }
    }

    /// Insert a value for `key` if it doesn't already have one.
    ///
    /// Returns `true` if the value was inserted. If `key` is already present
    /// then the existing value is kept, `value` is dropped and `false` is
    /// returned. Use [`SparseSet::replace`] to overwrite instead.
    ///
    /// Panics if `key` is not below [`SparseSet::num_supported`].
    #[inline]
    #[track_caller]
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.insert_with(key, || value)
    }

    /// Like [`SparseSet::insert`], but only constructs the value if `key` is
    /// absent.
    #[inline]
    #[track_caller]
    pub fn insert_with<F>(&mut self, key: K, f: F) -> bool
    where
        F: FnOnce() -> V,
    {
        self.check_supported(key);
        if self.sparse.get(key).is_some() {
            return false;
        }
        self.insert_unique(key, f());
        true
    }

    /// Insert a value for `key`, overwriting any existing value.
    ///
    /// Returns the previous value, if any.
    ///
    /// Panics if `key` is not below [`SparseSet::num_supported`].
    #[inline]
    #[track_caller]
    pub fn replace(&mut self, key: K, value: V) -> Option<V> {
        self.check_supported(key);
        if let Some(pos) = self.sparse.get(key) {
            Some(mem::replace(&mut self.dense[pos], value))
        } else {
            self.insert_unique(key, value);
            None
        }
    }

    #[inline]
    #[track_caller]
    fn check_supported(&self, key: K) {
        assert!(
            key.index() < self.sparse.len(),
            "identifier {} out of range (supported: {})",
            key.index(),
            self.sparse.len()
        );
    }

    /// Appends a value for an identifier known to be absent and returns a
    /// reference to it.
    ///
    /// The dense vectors reuse capacity left behind by earlier removals
    /// before reallocating.
    #[track_caller]
    fn insert_unique(&mut self, key: K, value: V) -> &mut V {
        debug_assert!(!self.contains(key));
        let pos = self.dense.len();
        trace!("Inserting {} at dense position {pos}", key.index());
        self.dense_ids.push(key);
        self.dense.push(value);
        self.sparse.set(key, pos);
        &mut self.dense[pos]
    }

    /// Remove the value for `key` and return it.
    ///
    /// The value is removed by moving the last value of the dense vector into
    /// its slot, like [`Vec::swap_remove`]. Returns `None` and leaves the set
    /// untouched if `key` is absent or out of range.
    pub fn remove(&mut self, key: K) -> Option<V> {
        let removed = self.sparse.get(key)?;
        let last = self.dense.len() - 1;

        let value = if removed == last {
            // Removing the back of `dense`, nothing else moves.
            trace!("Removing {} from dense position {removed}", key.index());
            self.dense_ids.pop();
            self.dense.pop()
        } else {
            // Move the back of `dense` into the hole and repair its sparse
            // slot.
            let moved = self.dense_ids[last];
            trace!(
                "Removing {} from dense position {removed}, moving {} from {last}",
                key.index(),
                moved.index()
            );
            self.sparse.set(moved, removed);
            self.dense_ids.swap_remove(removed);
            Some(self.dense.swap_remove(removed))
        };
        self.sparse.unset(key);
        value
    }

    /// Remove the value for `key`, dropping it.
    ///
    /// Returns `false` if there was no value, in which case nothing changes.
    #[inline]
    pub fn erase(&mut self, key: K) -> bool {
        self.remove(key).is_some()
    }

    /// Remove all values from the set.
    ///
    /// This takes time proportional to the number of values, not to the
    /// number of supported identifiers. The supported range and the dense
    /// capacity are kept.
    pub fn clear(&mut self) {
        trace!("Clearing {} values", self.dense.len());
        for &key in &self.dense_ids {
            self.sparse.unset(key);
        }
        self.dense_ids.clear();
        self.dense.clear();
    }

    /// Keep only the values for which `keep` returns `true`.
    ///
    /// Values are removed as if by [`SparseSet::remove`], so the order of the
    /// remaining values is not preserved.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(K, &mut V) -> bool,
    {
        let mut pos = 0;
        while pos < self.dense.len() {
            let key = self.dense_ids[pos];
            if keep(key, &mut self.dense[pos]) {
                pos += 1;
            } else {
                // The last value now occupies `pos` and still needs a visit.
                self.remove(key);
            }
        }
    }

    /// Frees the spare capacity of the dense vectors.
    ///
    /// The sparse table is not affected.
    pub fn shrink_to_fit(&mut self) {
        trace!(
            "Shrinking dense capacity from {} to {}",
            self.dense.capacity(),
            self.dense.len()
        );
        self.dense_ids.shrink_to_fit();
        self.dense.shrink_to_fit();
    }

    /// Get the values as a slice, in dense order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[V] {
        &self.dense
    }

    /// Get the values as a mutable slice, in dense order.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [V] {
        &mut self.dense
    }

    /// Get the identifiers as a slice, in dense order.
    ///
    /// `ids()[i]` is the identifier of `as_slice()[i]`.
    #[inline]
    #[must_use]
    pub fn ids(&self) -> &[K] {
        &self.dense_ids
    }

    /// Returns the sparse table backing this set.
    #[inline]
    #[must_use]
    pub fn sparse_table(&self) -> &SparseTable<K> {
        &self.sparse
    }

    /// Iterate over all the identifiers and values in this set, in dense
    /// order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.dense_ids.iter().copied().zip(self.dense.iter())
    }

    /// Iterate over all the identifiers and values in this set, mutable
    /// edition.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        self.dense_ids.iter().copied().zip(self.dense.iter_mut())
    }

    /// Iterate over all the identifiers in this set.
    #[inline]
    pub fn keys(&self) -> iter::Copied<slice::Iter<'_, K>> {
        self.dense_ids.iter().copied()
    }

    /// Iterate over all the values in this set.
    #[inline]
    pub fn values(&self) -> slice::Iter<'_, V> {
        self.dense.iter()
    }

    /// Iterate over all the values in this set, mutable edition.
    #[inline]
    pub fn values_mut(&mut self) -> slice::IterMut<'_, V> {
        self.dense.iter_mut()
    }

    /// Return an owning iterator over the values of the set.
    #[inline]
    #[must_use]
    pub fn into_values(self) -> vec::IntoIter<V> {
        self.dense.into_iter()
    }
}

/// Iterator over the identifiers and values of a [`SparseSet`].
pub type Iter<'a, K, V> = iter::Zip<iter::Copied<slice::Iter<'a, K>>, slice::Iter<'a, V>>;

/// Mutable iterator over the identifiers and values of a [`SparseSet`].
pub type IterMut<'a, K, V> = iter::Zip<iter::Copied<slice::Iter<'a, K>>, slice::IterMut<'a, V>>;

/// Owning iterator over the identifiers and values of a [`SparseSet`].
pub type IntoIter<K, V> = iter::Zip<vec::IntoIter<K>, vec::IntoIter<V>>;

impl<K, V> Default for SparseSet<K, V>
where
    K: SparseId,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Index<K> for SparseSet<K, V>
where
    K: SparseId,
{
    type Output = V;

    /// Panics if `key` has no value.
    #[inline]
    #[track_caller]
    fn index(&self, key: K) -> &V {
        match self.get(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<K, V> IndexMut<K> for SparseSet<K, V>
where
    K: SparseId,
{
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, key: K) -> &mut V {
        match self.sparse.get(key) {
            Some(pos) => &mut self.dense[pos],
            None => panic!("{}", self.invalid_id(key)),
        }
    }
}

impl<K, V> IntoIterator for SparseSet<K, V>
where
    K: SparseId,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.dense_ids.into_iter().zip(self.dense)
    }
}

impl<'a, K, V> IntoIterator for &'a SparseSet<K, V>
where
    K: SparseId,
{
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut SparseSet<K, V>
where
    K: SparseId,
{
    type Item = (K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V> fmt::Debug for SparseSet<K, V>
where
    K: SparseId + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use hashbrown::HashMap;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::debug_utils::check_invariants;

    fn set_123() -> SparseSet<u32, &'static str> {
        let mut set = SparseSet::with_max_index(8);
        assert!(set.insert(1, "a"));
        assert!(set.insert(2, "b"));
        assert!(set.insert(3, "c"));
        set
    }

    #[test]
    fn empty_set_supports_nothing() {
        let mut set = SparseSet::<u16, u64>::new();
        assert_eq!(set.num_supported(), 0);
        assert!(set.is_empty());
        assert!(!set.contains(0));
        assert_eq!(set.try_get(0), None);
        assert!(!set.erase(0));
        assert_eq!(
            set.get(5),
            Err(SparseSetError::InvalidId {
                index: 5,
                num_supported: 0
            })
        );

        set.grow_to(4);
        assert!(set.insert(3, 30));
        assert_eq!(set.get(3), Ok(&30));
    }

    #[test]
    fn insert_keeps_existing_value() {
        let mut set = set_123();
        assert!(!set.insert(2, "z"));
        assert_eq!(set.get(2), Ok(&"b"));
        assert_eq!(set.len(), 3);

        let mut called = false;
        assert!(!set.insert_with(2, || {
            called = true;
            "z"
        }));
        assert!(!called);
        check_invariants(&set).unwrap();
    }

    #[test]
    fn replace_overwrites() {
        let mut set = set_123();
        assert_eq!(set.replace(2, "z"), Some("b"));
        assert_eq!(set[2], "z");
        assert_eq!(set.replace(5, "e"), None);
        assert_eq!(set.len(), 4);
        assert_eq!(set.dense_index_of(5), Some(3));
        check_invariants(&set).unwrap();
    }

    #[test]
    fn erase_swaps_last_into_hole() {
        let mut set = set_123();
        assert!(set.erase(1));
        assert!(!set.contains(1));
        assert!(set.contains(2));
        assert!(set.contains(3));
        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice(), ["c", "b"]);
        assert_eq!(set.ids(), [3, 2]);
        assert_eq!(set.dense_index_of(3), Some(0));
        check_invariants(&set).unwrap();
    }

    #[test]
    fn erase_last_does_not_move() {
        let mut set = set_123();
        assert_eq!(set.remove(3), Some("c"));
        assert_eq!(set.as_slice(), ["a", "b"]);
        assert_eq!(set.dense_index_of(1), Some(0));
        assert_eq!(set.dense_index_of(2), Some(1));
        check_invariants(&set).unwrap();
    }

    #[test]
    fn erase_absent_is_noop() {
        let mut set = set_123();
        assert!(!set.erase(4));
        assert!(!set.erase(100));
        assert_eq!(set.len(), 3);
        assert_eq!(set.as_slice(), ["a", "b", "c"]);
        assert!(set.erase(2));
        assert!(!set.erase(2));
        assert_eq!(set.len(), 2);
        check_invariants(&set).unwrap();
    }

    #[test]
    fn out_of_range_queries() {
        let set = set_123();
        assert!(!set.contains(8));
        assert!(!set.contains(u32::MAX - 1));
        assert_eq!(set.try_get(1000), None);
        assert_eq!(set.dense_index_of(1000), None);
        assert_eq!(
            set.get(8),
            Err(SparseSetError::InvalidId {
                index: 8,
                num_supported: 8
            })
        );
        assert_eq!(set.num_supported(), 8);
    }

    #[test]
    fn get_absent_leaves_set_intact() {
        let mut set = set_123();
        assert!(set.get_mut(4).is_err());
        *set.get_mut(1).unwrap() = "x";
        assert_eq!(set.as_slice(), ["x", "b", "c"]);
        check_invariants(&set).unwrap();
    }

    #[test]
    #[should_panic(expected = "identifier 8 out of range (supported: 8)")]
    fn insert_out_of_range_panics() {
        let mut set = set_123();
        set.insert(8, "h");
    }

    #[test]
    #[should_panic(expected = "invalid identifier 4: no value present")]
    fn index_absent_panics() {
        let set = set_123();
        let _value = set[4];
    }

    #[test]
    fn removal_capacity_is_reused() {
        let mut set = SparseSet::<u8, u32>::with_max_index(64);
        for id in 0..32 {
            set.insert(id, u32::from(id));
        }
        let capacity = set.capacity();
        for id in 0..32 {
            set.erase(id);
        }
        assert!(set.is_empty());
        assert_eq!(set.capacity(), capacity);
        for id in 32..64 {
            set.insert(id, u32::from(id));
        }
        assert_eq!(set.capacity(), capacity);
        check_invariants(&set).unwrap();
    }

    #[test]
    fn shrink_to_fit_changes_only_capacity() {
        let mut set = SparseSet::<u32, u64>::with_max_index(100);
        for id in 0..100 {
            set.insert(id, u64::from(id) * 3);
        }
        for id in (0..100).step_by(3) {
            set.erase(id);
        }
        let len = set.len();
        let before: Vec<_> = (0..100).map(|id| set.try_get(id).copied()).collect();
        let capacity = set.capacity();
        assert!(capacity > len);

        set.shrink_to_fit();
        assert_eq!(set.len(), len);
        assert!(set.capacity() >= len);
        assert!(set.capacity() < capacity);
        assert_eq!(set.num_supported(), 100);
        let after: Vec<_> = (0..100).map(|id| set.try_get(id).copied()).collect();
        assert_eq!(before, after);
        check_invariants(&set).unwrap();
    }

    #[test]
    fn clear_keeps_support() {
        let mut set = set_123();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.num_supported(), 8);
        for id in 0..8 {
            assert!(!set.contains(id));
        }
        assert!(set.insert(3, "c"));
        assert_eq!(set.dense_index_of(3), Some(0));
        check_invariants(&set).unwrap();
    }

    #[test]
    fn retain_visits_every_value() {
        let mut set = SparseSet::<u32, u32>::with_max_index(20);
        for id in 0..20 {
            set.insert(id, id * 10);
        }
        let mut seen = vec![];
        set.retain(|id, value| {
            seen.push(id);
            *value += 1;
            id % 2 == 0
        });
        seen.sort_unstable();
        assert_eq!(seen, (0..20).collect::<Vec<_>>());
        assert_eq!(set.len(), 10);
        for id in 0..20 {
            assert_eq!(set.try_get(id).copied(), (id % 2 == 0).then_some(id * 10 + 1));
        }
        check_invariants(&set).unwrap();
    }

    #[test]
    fn iteration_follows_dense_order() {
        let mut set = set_123();
        set.erase(1);
        assert_eq!(set.iter().collect::<Vec<_>>(), [(3, &"c"), (2, &"b")]);
        assert_eq!(set.keys().collect::<Vec<_>>(), [3, 2]);
        for (_, value) in &mut set {
            *value = "v";
        }
        assert_eq!(set.values().copied().collect::<Vec<_>>(), ["v", "v"]);
        assert_eq!(set.clone().into_iter().collect::<Vec<_>>(), [(3, "v"), (2, "v")]);
        assert_eq!(set.into_values().len(), 2);
    }

    #[test]
    fn debug_format() {
        let mut set = SparseSet::<u8, char>::with_max_index(4);
        set.insert(2, 'x');
        set.insert(0, 'y');
        assert_eq!(alloc::format!("{set:?}"), "{2: 'x', 0: 'y'}");
    }

    #[test]
    fn growth_is_monotonic() {
        let mut set = SparseSet::<u16, ()>::new();
        let mut last = 0;
        for n in [10, 3, 0, 10, 500, 20] {
            set.grow_to(n);
            assert!(set.num_supported() >= last);
            last = set.num_supported();
        }
        assert_eq!(last, 500);
        assert_eq!(
            set.try_grow_to(70_000),
            Err(SparseSetError::IdSpaceExhausted {
                requested: 70_000,
                max: 65535
            })
        );
        assert_eq!(set.num_supported(), 500);
        assert_eq!(set.try_grow_to(1000), Ok(()));
        assert_eq!(set.num_supported(), 1000);
        assert_eq!(set.try_grow_to(10), Ok(()));
        assert_eq!(set.num_supported(), 1000);
    }

    #[test]
    #[should_panic(expected = "identifier space exhausted")]
    fn grow_past_id_range_panics() {
        let mut set = SparseSet::<u8, u32>::new();
        set.grow_to(300);
    }

    #[test]
    fn random_round_trip() {
        const N: u32 = 2000;
        let mut rng = StdRng::seed_from_u64(0x5eed);

        let mut ids: Vec<u32> = (0..N * 4).collect();
        ids.shuffle(&mut rng);
        ids.truncate(N as usize);

        let mut set = SparseSet::<u32, u64>::with_max_index((N * 4) as usize);
        let mut model = HashMap::new();
        for &id in &ids {
            let value: u64 = rng.random();
            assert!(set.insert(id, value));
            model.insert(id, value);
        }

        for &id in &ids {
            if rng.random_bool(0.4) {
                assert_eq!(set.remove(id), model.remove(&id));
            }
        }
        check_invariants(&set).unwrap();

        assert_eq!(set.len(), model.len());
        for id in 0..N * 4 {
            assert_eq!(set.contains(id), model.contains_key(&id));
            assert_eq!(set.try_get(id), model.get(&id));
        }

        let mut live: Vec<u64> = set.as_slice().to_vec();
        let mut expected: Vec<u64> = model.values().copied().collect();
        live.sort_unstable();
        expected.sort_unstable();
        assert_eq!(live, expected);
    }

    crate::sparse_id! {
        id Entity(u32, "e");
    }

    #[test]
    fn typed_identifiers() {
        let mut set: SparseSet<Entity, f32> = SparseSet::with_max_index(16);
        assert!(set.insert(Entity::new(4), 1.5));
        assert!(set.insert(Entity::new(9), 2.5));
        set[Entity::new(9)] *= 2.0;
        assert_eq!(set.try_get(Entity::new(9)), Some(&5.0));
        assert_eq!(set.ids(), [Entity::new(4), Entity::new(9)]);
        assert_eq!(
            set.get(Entity::new(1)).unwrap_err().to_string(),
            "invalid identifier 1: no value present"
        );
    }
}
