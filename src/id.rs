//! Identifier types used as keys of a [`SparseSet`].
//!
//! [`SparseSet`]: crate::SparseSet

use crate::packed_option::ReservedValue;

/// An unsigned integer identifier, or a typed wrapper around one.
///
/// The maximum value of the underlying integer type is reserved: it marks an
/// absent slot in the sparse table and must never be used as an identifier.
/// Identifiers therefore range over `0..MAX`.
pub trait SparseId: Copy + Eq + ReservedValue {
    /// The number of distinct identifiers representable by this type, which is
    /// also the largest valid argument to [`SparseSet::grow_to`].
    ///
    /// [`SparseSet::grow_to`]: crate::SparseSet::grow_to
    const MAX_INDEX: usize;

    /// Creates a new identifier from a raw index.
    fn new(index: usize) -> Self;

    /// Returns the index that was used to create this identifier.
    fn index(self) -> usize;
}

macro_rules! primitive_id {
    ($($int:ident),*) => {
        $(
            impl ReservedValue for $int {
                #[inline]
                fn reserved_value() -> Self {
                    $int::MAX
                }

                #[inline]
                fn is_reserved_value(&self) -> bool {
                    *self == $int::MAX
                }
            }

            impl SparseId for $int {
                // Saturates for u64 on 32-bit targets, where usize is the
                // tighter bound anyway.
                const MAX_INDEX: usize = if ($int::MAX as u128) < (usize::MAX as u128) {
                    $int::MAX as usize
                } else {
                    usize::MAX
                };

                #[inline]
                fn new(index: usize) -> Self {
                    debug_assert!(index < Self::MAX_INDEX, "identifier {index} is reserved");
                    index as $int
                }

                #[inline]
                fn index(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

primitive_id!(u8, u16, u32, u64, usize);

/// Defines typed identifiers wrapping an unsigned integer.
///
/// ```
/// use sparse_set::{sparse_id, SparseId, SparseSet};
///
/// sparse_id! {
///     /// A game entity.
///     pub id Entity(u32, "e");
/// }
///
/// let mut set: SparseSet<Entity, &str> = SparseSet::with_max_index(8);
/// set.insert(Entity::new(3), "three");
/// assert_eq!(set.try_get(Entity::new(3)), Some(&"three"));
/// assert_eq!(Entity::new(3).to_string(), "e3");
/// ```
#[macro_export]
macro_rules! sparse_id {
    ($($(#[$attr:meta])* $vis:vis id $name:ident($int:ident);)*) => {
        $(
            $(#[$attr])*
            #[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
            $vis struct $name($int);

            // Inherent copies of the SparseId methods that are const.
            impl $name {
                /// Creates a new identifier from a raw index.
                #[inline]
                #[allow(dead_code)]
                $vis const fn new(index: usize) -> Self {
                    debug_assert!(index < ($int::MAX as usize));
                    Self(index as $int)
                }

                /// Returns the index that was used to create this identifier.
                #[inline]
                #[allow(dead_code)]
                $vis const fn index(self) -> usize {
                    self.0 as usize
                }
            }

            impl $crate::SparseId for $name {
                const MAX_INDEX: usize = <$int as $crate::SparseId>::MAX_INDEX;

                #[inline]
                fn new(index: usize) -> Self {
                    debug_assert!(index < ($int::MAX as usize));
                    $name(index as $int)
                }

                #[inline]
                fn index(self) -> usize {
                    self.0 as usize
                }
            }

            impl $crate::ReservedValue for $name {
                #[inline]
                fn reserved_value() -> Self {
                    Self($int::MAX)
                }

                #[inline]
                fn is_reserved_value(&self) -> bool {
                    self.0 == $int::MAX
                }
            }
        )*
    };

    // Same as above but also provides Display/Debug impls.
    ($($(#[$attr:meta])* $vis:vis id $name:ident($int:ident, $display_prefix:expr);)*) => {
        $crate::sparse_id! {
            $($(#[$attr])* $vis id $name($int);)*
        }
        $(
            impl core::fmt::Display for $name {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    write!(f, concat!($display_prefix, "{}"), self.0)
                }
            }

            impl core::fmt::Debug for $name {
                fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                    core::fmt::Display::fmt(self, f)
                }
            }
        )*
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    sparse_id! {
        id Node(u16, "n");
    }

    #[test]
    fn primitive_max_index() {
        assert_eq!(<u8 as SparseId>::MAX_INDEX, 255);
        assert_eq!(<u16 as SparseId>::MAX_INDEX, 65535);
        assert!(u8::reserved_value().is_reserved_value());
        assert!(!0u8.is_reserved_value());
        assert_eq!(<u32 as SparseId>::new(7).index(), 7);
    }

    #[test]
    fn newtype_id() {
        let n = <Node as SparseId>::new(12);
        assert_eq!(n, Node::new(12));
        assert_eq!(SparseId::index(n), 12);
        assert_eq!(<Node as SparseId>::MAX_INDEX, 65535);
        assert!(Node::reserved_value().is_reserved_value());
        assert_eq!(alloc::format!("{n:?}"), "n12");
    }
}
