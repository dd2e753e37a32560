//! A textual, replayable sequence of operations on a sparse set.

use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "arbitrary")]
mod arbitrary;
#[cfg(feature = "arbitrary")]
pub use arbitrary::ArbitraryScriptConfig;

#[cfg(feature = "parse")]
mod parse;

/// A single operation on a `SparseSet<u32, u32>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `grow N`: grow the set to support identifiers below `N`.
    Grow(usize),

    /// `insert ID = VALUE`: insert a value unless one is already present.
    Insert(u32, u32),

    /// `replace ID = VALUE`: insert a value, overwriting any existing one.
    Replace(u32, u32),

    /// `erase ID`: remove the value, if any.
    Erase(u32),

    /// `get ID`: look up the value, checking every query method.
    Get(u32),

    /// `shrink`: release spare dense capacity.
    Shrink,

    /// `clear`: remove all values.
    Clear,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Op::Grow(n) => write!(f, "grow {n}"),
            Op::Insert(id, value) => write!(f, "insert {id} = {value}"),
            Op::Replace(id, value) => write!(f, "replace {id} = {value}"),
            Op::Erase(id) => write!(f, "erase {id}"),
            Op::Get(id) => write!(f, "get {id}"),
            Op::Shrink => write!(f, "shrink"),
            Op::Clear => write!(f, "clear"),
        }
    }
}

/// An ordered list of operations which can be replayed with
/// [`check_script`](super::check_script).
///
/// The text form has one operation per line, as printed by the [`Display`]
/// implementation of [`Op`]. Comments start with `#` and extend to the end of
/// the line.
///
/// ```text
/// grow 8
/// insert 1 = 10
/// insert 2 = 20   # dense position 1
/// erase 1
/// get 2
/// ```
///
/// [`Display`]: fmt::Display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpScript {
    ops: Vec<Op>,
}

impl OpScript {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operation to the script.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Returns the operations of the script in order.
    #[must_use]
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Number of operations in the script.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if the script has no operations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl From<Vec<Op>> for OpScript {
    fn from(ops: Vec<Op>) -> Self {
        Self { ops }
    }
}

impl FromIterator<Op> for OpScript {
    fn from_iter<I: IntoIterator<Item = Op>>(iter: I) -> Self {
        Self {
            ops: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for OpScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            writeln!(f, "{op}")?;
        }
        Ok(())
    }
}
