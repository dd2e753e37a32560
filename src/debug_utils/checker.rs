//! Checker which verifies the internal consistency of a sparse set and
//! replays operation scripts against a reference model.

use alloc::format;
use alloc::vec::Vec;
use core::fmt;

use anyhow::{Result, anyhow, bail, ensure};
use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;

use super::{Op, OpScript};
use crate::{SparseId, SparseSet, SparseSetError};

/// Checks that the three arrays of `set` agree with each other.
///
/// This verifies that:
/// - the dense identifier and value arrays have the same length, which does
///   not exceed the capacity or the number of supported identifiers,
/// - every dense position is claimed by exactly the identifier stored there,
/// - every present sparse slot points inside the live dense range, back at
///   its own identifier.
pub fn check_invariants<K, V>(set: &SparseSet<K, V>) -> Result<()>
where
    K: SparseId,
{
    let ids = set.ids();
    let len = set.len();
    ensure!(
        ids.len() == len,
        "dense identifier array has {} entries but {len} values are stored",
        ids.len()
    );
    ensure!(
        len <= set.capacity(),
        "{len} values stored with a capacity of {}",
        set.capacity()
    );
    ensure!(
        len <= set.num_supported(),
        "{len} values stored but only {} identifiers supported",
        set.num_supported()
    );

    for (pos, &id) in ids.iter().enumerate() {
        ensure!(
            id.index() < set.num_supported(),
            "dense position {pos}: identifier {} beyond supported range {}",
            id.index(),
            set.num_supported()
        );
        ensure!(
            set.dense_index_of(id) == Some(pos),
            "dense position {pos}: identifier {} maps to {:?}",
            id.index(),
            set.dense_index_of(id)
        );
    }

    let mut present = 0;
    for (id, pos) in set.sparse_table().iter() {
        ensure!(
            pos < len,
            "identifier {}: dense position {pos} out of bounds (len: {len})",
            id.index()
        );
        ensure!(
            ids[pos] == id,
            "identifier {}: dense position {pos} belongs to identifier {}",
            id.index(),
            ids[pos].index()
        );
        present += 1;
    }
    ensure!(
        present == len,
        "{present} identifiers present but {len} values stored"
    );

    Ok(())
}

/// Statistics collected while replaying a script.
#[derive(Debug, Default, Clone)]
pub struct CheckStats {
    ops: usize,
    inserts: usize,
    duplicate_inserts: usize,
    replaces: usize,
    erases: usize,
    absent_erases: usize,
    hits: usize,
    misses: usize,
    grows: usize,
    shrinks: usize,
    clears: usize,
    max_len: usize,
    max_supported: usize,
}

impl fmt::Display for CheckStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#?}")
    }
}

/// Reference model: a plain hash map from identifier to value.
type Model = HashMap<u32, u32, FxBuildHasher>;

/// Replays `script` on a `SparseSet<u32, u32>` and a reference model,
/// checking that they agree after every operation.
///
/// Besides the results of each operation, this checks the set's invariants
/// after every step, that the number of supported identifiers never
/// decreases, and that shrinking changes nothing observable.
///
/// The script must have passed [`validate_script`](super::validate_script).
pub fn check_script(script: &OpScript) -> Result<CheckStats> {
    let mut set = SparseSet::<u32, u32>::new();
    let mut model = Model::default();
    let mut stats = CheckStats::default();

    for (i, &op) in script.ops().iter().enumerate() {
        trace!("Replaying op {i}: {op}");
        let supported_before = set.num_supported();
        check_op(&mut set, &mut model, &mut stats, op)
            .map_err(|err| err.context(format!("op {i} ({op}) failed")))?;
        check_invariants(&set)
            .map_err(|err| err.context(format!("invariants broken after op {i} ({op})")))?;
        ensure!(
            set.num_supported() >= supported_before,
            "op {i} ({op}): supported identifiers shrank from {supported_before} to {}",
            set.num_supported()
        );
        ensure!(
            set.len() == model.len(),
            "op {i} ({op}): set has {} values, model has {}",
            set.len(),
            model.len()
        );
        stats.max_len = stats.max_len.max(set.len());
        stats.max_supported = stats.max_supported.max(set.num_supported());
    }

    // Final sweep over the whole identifier range.
    for index in 0..set.num_supported() {
        let id = index as u32;
        ensure!(
            set.try_get(id) == model.get(&id),
            "final state: identifier {id} holds {:?}, expected {:?}",
            set.try_get(id),
            model.get(&id)
        );
    }

    Ok(stats)
}

fn check_op(
    set: &mut SparseSet<u32, u32>,
    model: &mut Model,
    stats: &mut CheckStats,
    op: Op,
) -> Result<()> {
    stat!(stats, ops);
    match op {
        Op::Grow(n) => {
            stat!(stats, grows);
            let before = set.num_supported();
            set.try_grow_to(n).map_err(|err| anyhow!("{err}"))?;
            ensure!(
                set.num_supported() == before.max(n),
                "supports {} identifiers, expected {}",
                set.num_supported(),
                before.max(n)
            );
        }
        Op::Insert(id, value) => {
            check_supported(set, id)?;
            let expected = !model.contains_key(&id);
            if expected {
                model.insert(id, value);
                stat!(stats, inserts);
            } else {
                stat!(stats, duplicate_inserts);
            }
            let inserted = set.insert(id, value);
            ensure!(
                inserted == expected,
                "insert returned {inserted}, expected {expected}"
            );
        }
        Op::Replace(id, value) => {
            check_supported(set, id)?;
            stat!(stats, replaces);
            let old = set.replace(id, value);
            let expected = model.insert(id, value);
            ensure!(
                old == expected,
                "replace returned {old:?}, expected {expected:?}"
            );
        }
        Op::Erase(id) => {
            let expected = model.remove(&id).is_some();
            if expected {
                stat!(stats, erases);
            } else {
                stat!(stats, absent_erases);
            }
            let len = set.len();
            let erased = set.erase(id);
            ensure!(
                erased == expected,
                "erase returned {erased}, expected {expected}"
            );
            ensure!(
                set.len() == len - usize::from(erased),
                "length went from {len} to {}",
                set.len()
            );
        }
        Op::Get(id) => check_get(set, model, stats, id)?,
        Op::Shrink => {
            stat!(stats, shrinks);
            let ids: Vec<u32> = set.ids().to_vec();
            let values: Vec<u32> = set.as_slice().to_vec();
            set.shrink_to_fit();
            ensure!(
                set.ids() == ids && set.as_slice() == values,
                "shrinking changed the contents of the set"
            );
            ensure!(
                set.capacity() >= set.len(),
                "capacity {} below length {}",
                set.capacity(),
                set.len()
            );
        }
        Op::Clear => {
            stat!(stats, clears);
            let supported = set.num_supported();
            set.clear();
            model.clear();
            ensure!(set.is_empty(), "set not empty after clear");
            ensure!(
                set.num_supported() == supported,
                "clear changed supported identifiers from {supported} to {}",
                set.num_supported()
            );
        }
    }
    Ok(())
}

fn check_supported(set: &SparseSet<u32, u32>, id: u32) -> Result<()> {
    // Inserting out of range panics: report it as a script error instead.
    ensure!(
        (id as usize) < set.num_supported(),
        "identifier out of range (supported: {})",
        set.num_supported()
    );
    Ok(())
}

fn check_get(
    set: &mut SparseSet<u32, u32>,
    model: &Model,
    stats: &mut CheckStats,
    id: u32,
) -> Result<()> {
    let expected = model.get(&id).copied();
    ensure!(
        set.contains(id) == expected.is_some(),
        "contains returned {}, expected {}",
        set.contains(id),
        expected.is_some()
    );
    ensure!(
        set.try_get(id).copied() == expected,
        "try_get returned {:?}, expected {expected:?}",
        set.try_get(id)
    );
    ensure!(
        set.try_get_mut(id).map(|value| *value) == expected,
        "try_get_mut disagrees with try_get"
    );
    match (set.get(id), expected) {
        (Ok(&value), Some(expected)) => {
            stat!(stats, hits);
            ensure!(value == expected, "get returned {value}, expected {expected}");
        }
        (Err(SparseSetError::InvalidId { index, .. }), None) => {
            stat!(stats, misses);
            ensure!(
                index == id as usize,
                "get reported identifier {index} as invalid"
            );
        }
        (result, expected) => bail!("get returned {result:?}, expected {expected:?}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn replay_swap_remove_script() {
        let script = OpScript::from(vec![
            Op::Grow(4),
            Op::Insert(1, 10),
            Op::Insert(2, 20),
            Op::Insert(3, 30),
            Op::Insert(2, 99),
            Op::Erase(1),
            Op::Erase(1),
            Op::Get(1),
            Op::Get(3),
            Op::Get(50),
            Op::Shrink,
            Op::Grow(2),
            Op::Replace(0, 5),
            Op::Clear,
            Op::Insert(3, 31),
        ]);
        let stats = check_script(&script).unwrap();
        assert_eq!(stats.inserts, 4);
        assert_eq!(stats.duplicate_inserts, 1);
        assert_eq!(stats.erases, 1);
        assert_eq!(stats.absent_erases, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.max_len, 3);
        assert_eq!(stats.max_supported, 4);
    }

    #[test]
    fn invalid_script_is_reported() {
        let script = OpScript::from(vec![Op::Grow(2), Op::Insert(2, 0)]);
        let err = check_script(&script).unwrap_err();
        assert!(alloc::format!("{err:#}").contains("op 1 (insert 2 = 0) failed"));
    }

    #[test]
    fn invariants_of_fresh_sets() {
        check_invariants(&SparseSet::<u8, ()>::new()).unwrap();
        check_invariants(&SparseSet::<u64, ()>::with_max_index(100)).unwrap();
    }
}
