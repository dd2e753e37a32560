//! Operation script validation.

use anyhow::{Result, ensure};

use super::{Op, OpScript};
use crate::{ReservedValue, SparseId};

/// Checks `script` to ensure that replaying it never violates a precondition
/// of the set.
///
/// Scripts replayed by [`check_script`](super::check_script) must pass this
/// first: an invalid script is a bug in the script, not in the set.
pub fn validate_script(script: &OpScript) -> Result<()> {
    let mut supported = 0;
    for (i, &op) in script.ops().iter().enumerate() {
        match op {
            Op::Grow(n) => {
                ensure!(
                    n <= <u32 as SparseId>::MAX_INDEX,
                    "op {i} ({op}): identifier space exhausted (max: {})",
                    <u32 as SparseId>::MAX_INDEX
                );
                supported = supported.max(n);
            }
            Op::Insert(id, _) | Op::Replace(id, _) => {
                ensure!(
                    (id as usize) < supported,
                    "op {i} ({op}): identifier out of range (supported: {supported})"
                );
            }
            Op::Erase(id) | Op::Get(id) => {
                ensure!(
                    !id.is_reserved_value(),
                    "op {i} ({op}): identifier is reserved"
                );
            }
            Op::Shrink | Op::Clear => {}
        }
    }
    Ok(())
}
