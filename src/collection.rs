use alloc::collections::BTreeSet;
use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::hash_set::IntHashSet;
use crate::primitive::Primitive;

/// A read-only view of a collection of primitive values.
///
/// This is the argument type of the bulk operations on
/// [`IntHashSet`]: [`add_all`](IntHashSet::add_all),
/// [`remove_all`](IntHashSet::remove_all),
/// [`retain_all`](IntHashSet::retain_all) and
/// [`contains_all`](IntHashSet::contains_all). It is implemented for
/// `IntHashSet` itself, slices, arrays, `Vec`, `VecDeque`, `BTreeSet` and
/// (with the `std` feature) `std::collections::HashSet`.
///
/// `values` may yield duplicates for collections that allow them.
pub trait PrimitiveCollection<T: Primitive> {
    /// Number of values in the collection, duplicates included.
    fn len(&self) -> usize;

    /// Returns `true` if the collection holds no values.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `value` is in the collection.
    fn contains(&self, value: T) -> bool;

    /// Iterates over the values of the collection.
    fn values(&self) -> impl Iterator<Item = T> + '_;
}

impl<T: Primitive> PrimitiveCollection<T> for IntHashSet<T> {
    #[inline]
    fn len(&self) -> usize {
        IntHashSet::len(self)
    }

    #[inline]
    fn contains(&self, value: T) -> bool {
        IntHashSet::contains(self, value)
    }

    fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.iter()
    }
}

impl<T: Primitive> PrimitiveCollection<T> for [T] {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn contains(&self, value: T) -> bool {
        self.iter().any(|v| *v == value)
    }

    fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().copied()
    }
}

impl<T: Primitive, const N: usize> PrimitiveCollection<T> for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn contains(&self, value: T) -> bool {
        PrimitiveCollection::contains(self.as_slice(), value)
    }

    fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().copied()
    }
}

impl<T: Primitive> PrimitiveCollection<T> for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn contains(&self, value: T) -> bool {
        PrimitiveCollection::contains(self.as_slice(), value)
    }

    fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().copied()
    }
}

impl<T: Primitive> PrimitiveCollection<T> for VecDeque<T> {
    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn contains(&self, value: T) -> bool {
        self.iter().any(|v| *v == value)
    }

    fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().copied()
    }
}

impl<T: Primitive + Ord> PrimitiveCollection<T> for BTreeSet<T> {
    #[inline]
    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    #[inline]
    fn contains(&self, value: T) -> bool {
        BTreeSet::contains(self, &value)
    }

    fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().copied()
    }
}

#[cfg(feature = "std")]
impl<T, S> PrimitiveCollection<T> for std::collections::HashSet<T, S>
where
    T: Primitive + core::hash::Hash,
    S: core::hash::BuildHasher,
{
    #[inline]
    fn len(&self) -> usize {
        std::collections::HashSet::len(self)
    }

    #[inline]
    fn contains(&self, value: T) -> bool {
        std::collections::HashSet::contains(self, &value)
    }

    fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.iter().copied()
    }
}
