//! A sparse set: a map from sparse integer identifiers to values that are
//! stored contiguously with no holes.
//!
//! This crate is compatible with `#![no_std]` and only requires `alloc`.
//!
//! # Usage
//!
//! A [`SparseSet<K, V>`] is keyed by an identifier type implementing
//! [`SparseId`]. All unsigned integer types implement it, and typed wrappers
//! can be declared with the [`sparse_id!`] macro. The maximum value of the
//! underlying integer is reserved to mark absent slots and must never be used
//! as an identifier.
//!
//! The set only accepts identifiers below [`SparseSet::num_supported`]. This
//! limit is raised explicitly with [`SparseSet::grow_to`] (or by constructing
//! the set with [`SparseSet::with_max_index`]); inserting an identifier beyond
//! it is a bug in the caller and panics. Queries such as
//! [`SparseSet::contains`] and [`SparseSet::try_get`] on the other hand accept
//! any identifier and simply report it as absent.
//!
//! ```
//! use sparse_set::SparseSet;
//!
//! let mut set: SparseSet<u32, &str> = SparseSet::with_max_index(16);
//! assert!(set.insert(1, "one"));
//! assert!(set.insert(2, "two"));
//! assert!(set.insert(3, "three"));
//!
//! // Inserting an existing identifier keeps the old value.
//! assert!(!set.insert(2, "deux"));
//! assert_eq!(set[2], "two");
//!
//! // Removal moves the last value into the hole.
//! assert!(set.erase(1));
//! assert_eq!(set.as_slice(), ["three", "two"]);
//! assert!(!set.contains(1));
//! assert!(!set.contains(1000));
//! ```
//!
//! # Performance
//!
//! Insertion, removal, lookup and existence checks are all O(1). The values
//! of a set are stored in a single vector which can be iterated over directly
//! with [`SparseSet::as_slice`], visiting only live values. The price is that
//! the order of that vector is not preserved across removals.
//!
//! Removing values never frees memory: the dense vectors keep their capacity
//! for future insertions until [`SparseSet::shrink_to_fit`] is called, and the
//! sparse table never shrinks at all.
//!
//! # Validation
//!
//! The [`debug_utils`] module contains a textual format for sequences of
//! operations on a set, an invariant checker and a replay harness comparing a
//! set against a reference model. These are used by the fuzz targets and the
//! command-line tool.

#![no_std]
#![warn(rust_2018_idioms, missing_docs)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::doc_markdown
)]
#![warn(
    clippy::explicit_iter_loop,
    clippy::range_plus_one,
    clippy::map_unwrap_or,
    clippy::cloned_instead_of_copied,
    clippy::semicolon_if_nothing_returned,
    clippy::must_use_candidate,
    clippy::iter_without_into_iter,
    clippy::uninlined_format_args,
    clippy::ignored_unit_patterns
)]

extern crate alloc;

use core::fmt;

// Formatting the trace messages has a measurable cost even when the log level
// filters them out, so they are only compiled in with the `trace-log` feature.
macro_rules! trace {
    ($($tt:tt)*) => {
        if cfg!(feature = "trace-log") {
            ::log::trace!($($tt)*);
        }
    };
}

// Macro for collecting statistics.
macro_rules! stat {
    ($stats:expr, $field:ident) => {
        $stats.$field += 1
    };
}

mod id;

pub mod debug_utils;
pub mod packed_option;
pub mod sparse_set;
pub mod sparse_table;

pub use id::SparseId;
pub use packed_option::{PackedOption, ReservedValue};
pub use sparse_set::SparseSet;
pub use sparse_table::SparseTable;

/// Error returned by the fallible operations of a [`SparseSet`].
///
/// Inserting an identifier that is already present or erasing one that is
/// absent are not errors: those operations report what they did through
/// their return value instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SparseSetError {
    /// The identifier has no value in the set, either because it was never
    /// inserted or because it lies beyond the supported range.
    InvalidId {
        /// Index of the offending identifier.
        index: usize,

        /// Number of identifiers supported by the set at the time.
        num_supported: usize,
    },

    /// The set was asked to support more identifiers than the identifier type
    /// can represent.
    IdSpaceExhausted {
        /// Requested number of supported identifiers.
        requested: usize,

        /// Maximum number of identifiers for the identifier type.
        max: usize,
    },

    /// The memory allocator failed while growing the set.
    AllocFailed,
}

impl fmt::Display for SparseSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SparseSetError::InvalidId {
                index,
                num_supported,
            } => {
                if index < num_supported {
                    write!(f, "invalid identifier {index}: no value present")
                } else {
                    write!(
                        f,
                        "invalid identifier {index}: out of range (supported: {num_supported})"
                    )
                }
            }
            SparseSetError::IdSpaceExhausted { requested, max } => {
                write!(
                    f,
                    "cannot support {requested} identifiers: identifier type allows at most {max}"
                )
            }
            SparseSetError::AllocFailed => write!(f, "memory allocation failed"),
        }
    }
}

impl core::error::Error for SparseSetError {}
