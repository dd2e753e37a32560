//! Sentinel-encoded `Option` used for sparse table slots.

use core::fmt;

/// Types that have a reserved value which does not represent a valid value.
pub trait ReservedValue {
    /// Create an instance of the reserved value.
    fn reserved_value() -> Self;

    /// Checks whether value is the reserved one.
    fn is_reserved_value(&self) -> bool;
}

/// Packed representation of `Option<T>` for types implementing [`ReservedValue`].
///
/// The sparse table of a [`SparseSet`] is a vector of these: a slot holding
/// the reserved value marks an absent identifier, so no separate validity
/// array is needed and a slot is exactly as large as an identifier.
///
/// ```
/// use sparse_set::PackedOption;
///
/// let packed_some: PackedOption<u16> = Some(3).into();
/// assert!(packed_some.is_some());
/// assert_eq!(packed_some.expand(), Some(3));
/// let packed_none: PackedOption<u16> = None.into();
/// assert!(packed_none.is_none());
/// assert_eq!(packed_none.expand(), None);
/// ```
///
/// [`SparseSet`]: crate::SparseSet
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PackedOption<T: ReservedValue>(T);

impl<T: ReservedValue> PackedOption<T> {
    /// The packed `None`.
    #[inline]
    pub fn none() -> Self {
        Self(T::reserved_value())
    }

    /// Returns `true` if the packed option is a `None` value.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.0.is_reserved_value()
    }

    /// Returns `true` if the packed option is a `Some` value.
    #[inline]
    pub fn is_some(&self) -> bool {
        !self.0.is_reserved_value()
    }

    /// Expands the packed option into a normal `Option`.
    #[inline]
    pub fn expand(self) -> Option<T> {
        if self.is_none() { None } else { Some(self.0) }
    }
}

impl<T: ReservedValue> Default for PackedOption<T> {
    #[inline]
    fn default() -> Self {
        Self::none()
    }
}

impl<T: ReservedValue> From<T> for PackedOption<T> {
    /// Convert `t` into a packed `Some(t)`.
    ///
    /// Packing the reserved value itself would silently produce `None`, which
    /// is caught in debug builds.
    #[inline]
    fn from(t: T) -> Self {
        debug_assert!(
            !t.is_reserved_value(),
            "cannot pack the reserved value as Some"
        );
        Self(t)
    }
}

impl<T: ReservedValue> From<Option<T>> for PackedOption<T> {
    #[inline]
    fn from(opt: Option<T>) -> Self {
        opt.map_or_else(Self::none, Self::from)
    }
}

impl<T: ReservedValue> From<PackedOption<T>> for Option<T> {
    #[inline]
    fn from(opt: PackedOption<T>) -> Self {
        opt.expand()
    }
}

impl<T> fmt::Debug for PackedOption<T>
where
    T: ReservedValue + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "None")
        } else {
            write!(f, "Some({:?})", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_type_max() {
        let none = PackedOption::<u8>::default();
        assert!(none.is_none());
        assert_eq!(core::mem::size_of::<PackedOption<u8>>(), 1);
        assert_eq!(PackedOption::<u8>::from(None), none);

        let some = PackedOption::from(254u8);
        assert!(some.is_some());
        assert_eq!(Option::<u8>::from(some), Some(254));
        assert_eq!(alloc::format!("{some:?} {none:?}"), "Some(254) None");
    }

    // Not `Copy`, so formatting must not consume the slot.
    #[derive(Debug, PartialEq)]
    struct Label(alloc::string::String);

    impl ReservedValue for Label {
        fn reserved_value() -> Self {
            Label(alloc::string::String::new())
        }

        fn is_reserved_value(&self) -> bool {
            self.0.is_empty()
        }
    }

    #[test]
    fn debug_borrows_non_copy_values() {
        let some = PackedOption::from(Label("x".into()));
        assert_eq!(alloc::format!("{some:?}"), r#"Some(Label("x"))"#);
        assert_eq!(alloc::format!("{:?}", PackedOption::<Label>::none()), "None");
        assert_eq!(some.expand(), Some(Label("x".into())));
    }
}
