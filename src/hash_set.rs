use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Debug;
use core::fmt::Display;
use core::hash::Hash;
use core::hash::Hasher;
use core::iter::FusedIterator;

use crate::collection::PrimitiveCollection;
use crate::cursor::Cursor;
use crate::error::Error;
#[cfg(any(test, feature = "stats"))]
use crate::hash_table::DebugStats;
#[cfg(any(test, feature = "stats"))]
use crate::hash_table::ProbeHistogram;
use crate::hash_table::ProbeTable;
use crate::hash_table::SlotWalk;
use crate::primitive::Primitive;

/// Capacity used by [`IntHashSet::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Load factor used when none is specified.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.55;

/// A set of fixed-width integers using open addressing with linear probing.
///
/// Values live directly in a power-of-two slot buffer; zero marks an empty
/// slot, so zero's own membership is kept in a side flag. Once the buffer has
/// grown to its working size, inserts and removals never allocate.
///
/// Removal repairs the probe chain in place (backward-shift deletion) instead
/// of leaving tombstones, so lookups stay short under churn.
///
/// # Performance Characteristics
///
/// - **Memory**: `size_of::<T>()` bytes per slot, no per-entry overhead.
/// - **Lookups**: a linear scan from the value's home slot to the first empty
///   slot.
///
/// # Examples
///
/// ```rust
/// use probe_set::IntHashSet;
///
/// let mut set: IntHashSet<i32> = IntHashSet::new();
/// assert!(set.add(0));
/// assert!(set.add(42));
/// assert!(!set.add(42));
/// assert!(set.contains(0));
/// assert_eq!(set.len(), 2);
/// ```
#[derive(Clone)]
pub struct IntHashSet<T> {
    pub(crate) table: ProbeTable<T>,
    pub(crate) contains_zero: bool,
}

impl<T: Primitive> IntHashSet<T> {
    /// Creates an empty set with capacity 16 and load factor 0.55.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty set with room for `capacity` slots (rounded up to a
    /// power of two) and the default load factor.
    ///
    /// # Panics
    ///
    /// Panics if the rounded capacity overflows `usize`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_set::IntHashSet;
    ///
    /// let set: IntHashSet<u16> = IntHashSet::with_capacity(100);
    /// assert_eq!(set.capacity(), 128);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR) {
            Ok(set) => set,
            Err(err) => panic!("{}", err),
        }
    }

    /// Creates an empty set with the given initial capacity and load factor.
    ///
    /// The capacity is rounded up to a power of two (at least 1). The load
    /// factor must lie within
    /// [`MIN_LOAD_FACTOR`](crate::MIN_LOAD_FACTOR)..=[`MAX_LOAD_FACTOR`](crate::MAX_LOAD_FACTOR).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLoadFactor`] for a NaN or out-of-range load factor,
    /// [`Error::InvalidCapacity`] if the capacity cannot be rounded up.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_set::Error;
    /// use probe_set::IntHashSet;
    ///
    /// let set = IntHashSet::<i64>::with_capacity_and_load_factor(10, 0.75).unwrap();
    /// assert_eq!(set.capacity(), 16);
    ///
    /// let err = IntHashSet::<i64>::with_capacity_and_load_factor(10, 0.95).unwrap_err();
    /// assert_eq!(err, Error::InvalidLoadFactor(0.95));
    /// ```
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Result<Self, Error> {
        Ok(Self {
            table: ProbeTable::with_capacity(capacity, load_factor)?,
            contains_zero: false,
        })
    }

    /// Creates a set holding the values of `c`, sized for `c.len()` slots.
    ///
    /// ```rust
    /// use probe_set::IntHashSet;
    ///
    /// let set = IntHashSet::from_collection(&[3u8, 1, 3, 0]);
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn from_collection<C>(c: &C) -> Self
    where
        C: PrimitiveCollection<T> + ?Sized,
    {
        let mut set = Self::with_capacity(c.len());
        set.add_all(c);
        set
    }

    /// Returns the number of values in the set, zero included.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len() + self.contains_zero as usize
    }

    /// Returns `true` if the set contains no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots in the backing buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns the load factor the set was created with.
    #[inline]
    pub fn load_factor(&self) -> f32 {
        self.table.load_factor()
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. Inserting past the
    /// resize threshold doubles the capacity before returning.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_set::IntHashSet;
    ///
    /// let mut set: IntHashSet<i8> = IntHashSet::new();
    /// assert_eq!(set.add(-7), true);
    /// assert_eq!(set.add(-7), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&mut self, value: T) -> bool {
        if value == T::ZERO {
            if self.contains_zero {
                return false;
            }
            self.table.touch();
            self.contains_zero = true;
            return true;
        }

        self.table.insert(value)
    }

    /// Removes a value from the set. Returns whether the value was present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_set::IntHashSet;
    ///
    /// let mut set: IntHashSet<u32> = IntHashSet::new();
    /// set.add(5);
    /// assert_eq!(set.remove(5), true);
    /// assert_eq!(set.remove(5), false);
    /// ```
    pub fn remove(&mut self, value: T) -> bool {
        if value == T::ZERO {
            if !self.contains_zero {
                return false;
            }
            self.table.touch();
            self.contains_zero = false;
            return true;
        }

        self.table.remove(value)
    }

    /// Returns `true` if the set contains `value`.
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        if value == T::ZERO {
            return self.contains_zero;
        }
        self.table.find(value).is_some()
    }

    /// Removes all values, keeping the allocated capacity.
    ///
    /// Clearing an empty set is not a structural change and leaves open
    /// cursors valid.
    pub fn clear(&mut self) {
        if self.is_empty() {
            return;
        }
        self.table.clear();
        self.table.touch();
        self.contains_zero = false;
    }

    /// Rebuilds the set into a buffer of exactly `capacity` slots.
    ///
    /// Membership is unchanged; only the physical layout (and therefore the
    /// iteration order) changes.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCapacity`] if `capacity` is not a power of two or its
    /// resize threshold is below the current number of non-zero values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_set::IntHashSet;
    ///
    /// let mut set: IntHashSet<i32> = (1..=4).collect();
    /// set.rehash(64).unwrap();
    /// assert_eq!(set.capacity(), 64);
    /// assert!(set.rehash(48).is_err());
    /// assert!(set.rehash(4).is_err());
    /// ```
    pub fn rehash(&mut self, capacity: usize) -> Result<(), Error> {
        self.table.check_rehash_capacity(capacity)?;
        log::debug!(
            "rehashing set from {} to {} slots",
            self.table.capacity(),
            capacity
        );
        self.table.rehash(capacity);
        Ok(())
    }

    /// Shrinks the backing buffer to the smallest power of two that holds the
    /// current values within the load factor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_set::IntHashSet;
    ///
    /// let mut set: IntHashSet<u64> = (1..=1000).collect();
    /// set.retain(|v| v <= 5);
    /// set.compact();
    /// assert_eq!(set.len(), 5);
    /// assert_eq!(set.capacity(), 16);
    /// ```
    pub fn compact(&mut self) {
        // Overflow here means the current capacity is already the best fit.
        let Ok(capacity) = self.table.compact_capacity(self.len()) else {
            return;
        };
        log::debug!(
            "compacting set from {} to {} slots ({} values)",
            self.table.capacity(),
            capacity,
            self.len()
        );
        self.table.rehash(capacity);
    }

    /// Adds every value of `c`. Returns whether the set changed.
    ///
    /// `c` may be another set, a slice or array, a `Vec`, or any other
    /// [`PrimitiveCollection`].
    ///
    /// ```rust
    /// use probe_set::IntHashSet;
    ///
    /// let mut set: IntHashSet<i16> = IntHashSet::new();
    /// assert!(set.add_all(&[1, 2, 3]));
    /// assert!(!set.add_all(&vec![1, 2]));
    /// assert_eq!(set.len(), 3);
    /// ```
    pub fn add_all<C>(&mut self, c: &C) -> bool
    where
        C: PrimitiveCollection<T> + ?Sized,
    {
        if c.is_empty() {
            return false;
        }

        let mut changed = false;
        for value in c.values() {
            changed |= self.add(value);
        }
        changed
    }

    /// Removes every value of `c`. Returns whether the set changed.
    pub fn remove_all<C>(&mut self, c: &C) -> bool
    where
        C: PrimitiveCollection<T> + ?Sized,
    {
        let mut changed = false;
        for value in c.values() {
            changed |= self.remove(value);
        }
        changed
    }

    /// Keeps only the values that `c` also contains. Returns whether the set
    /// changed.
    ///
    /// ```rust
    /// use probe_set::IntHashSet;
    ///
    /// let mut set: IntHashSet<u8> = IntHashSet::from_collection(&[0, 1, 2, 3]);
    /// assert!(set.retain_all(&[2, 3, 4]));
    /// assert_eq!(set.len(), 2);
    /// assert!(!set.contains(0));
    /// ```
    pub fn retain_all<C>(&mut self, c: &C) -> bool
    where
        C: PrimitiveCollection<T> + ?Sized,
    {
        self.remove_if(|value| !c.contains(value))
    }

    /// Returns `true` if every value of `c` is in the set.
    pub fn contains_all<C>(&self, c: &C) -> bool
    where
        C: PrimitiveCollection<T> + ?Sized,
    {
        c.values().all(|value| self.contains(value))
    }

    /// Removes every value for which `predicate` returns `true`, visiting
    /// values in iteration order. Returns whether anything was removed.
    pub fn remove_if(&mut self, mut predicate: impl FnMut(T) -> bool) -> bool {
        let Ok(removed) =
            self.try_remove_if(|value| Ok::<_, core::convert::Infallible>(predicate(value)));
        removed
    }

    /// Like [`remove_if`](Self::remove_if), with a fallible predicate.
    ///
    /// The first error is returned unchanged. Values removed before the error
    /// stay removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probe_set::IntHashSet;
    ///
    /// let mut set: IntHashSet<i32> = (1..=10).collect();
    /// let result = set.try_remove_if(|v| if v == 7 { Err("seven") } else { Ok(v % 2 == 0) });
    /// assert_eq!(result, Err("seven"));
    /// assert!(set.contains(7));
    /// ```
    pub fn try_remove_if<E>(
        &mut self,
        mut predicate: impl FnMut(T) -> Result<bool, E>,
    ) -> Result<bool, E> {
        let mut removed = false;
        let mut walk = SlotWalk::new(self.table.slots());
        while let Some(index) = walk.next_occupied(self.table.slots()) {
            if predicate(self.table.slots()[index])? {
                self.table.remove_at(index);
                removed = true;
            }
        }

        if self.contains_zero && predicate(T::ZERO)? {
            self.table.touch();
            self.contains_zero = false;
            removed = true;
        }

        Ok(removed)
    }

    /// Retains only the values for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(T) -> bool) {
        self.remove_if(|value| !f(value));
    }

    /// Returns an iterator over the values of the set.
    ///
    /// Values are yielded by walking the slots backward from a fixed starting
    /// point, with zero (if present) last.
    ///
    /// ```rust
    /// use probe_set::IntHashSet;
    ///
    /// let set: IntHashSet<i32> = [1, 2, 3, 0].into_iter().collect();
    /// let values: Vec<i32> = set.iter().collect();
    /// assert_eq!(values, [3, 2, 1, 0]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.table.slots(),
            walk: SlotWalk::new(self.table.slots()),
            remaining: self.len(),
            zero: self.contains_zero,
        }
    }

    /// Returns a detached [`Cursor`] that can remove values while iterating
    /// and detects structural changes made through any other path.
    pub fn cursor(&self) -> Cursor<T> {
        Cursor::new(self)
    }

    /// Copies the values into a new `Vec`, in iteration order.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.iter());
        out
    }

    /// Copies the values into `dest` if it is large enough, otherwise into a
    /// freshly allocated buffer of exactly [`len`](Self::len) values.
    ///
    /// When `dest` has room to spare, the slot right after the last value is
    /// set to zero.
    ///
    /// ```rust
    /// use std::borrow::Cow;
    ///
    /// use probe_set::IntHashSet;
    ///
    /// let set: IntHashSet<u8> = [7, 9].into_iter().collect();
    ///
    /// let mut buf = [1u8; 4];
    /// let values = set.to_array(&mut buf);
    /// assert!(matches!(values, Cow::Borrowed(_)));
    /// assert_eq!(values.len(), 2);
    /// assert_eq!(buf[2..], [0, 1]);
    ///
    /// let mut small = [0u8; 1];
    /// assert!(matches!(set.to_array(&mut small), Cow::Owned(_)));
    /// ```
    pub fn to_array<'a>(&self, dest: &'a mut [T]) -> Cow<'a, [T]> {
        let len = self.len();
        if dest.len() < len {
            return Cow::Owned(self.to_vec());
        }

        for (slot, value) in dest.iter_mut().zip(self.iter()) {
            *slot = value;
        }
        if dest.len() > len {
            dest[len] = T::ZERO;
        }
        Cow::Borrowed(&dest[..len])
    }

    /// Returns the sum of the values' hash codes (wrapping), zero included.
    ///
    /// Equal sets have equal hash codes regardless of capacity or layout.
    pub fn hash_code(&self) -> i32 {
        let mut hash = self
            .table
            .slots()
            .iter()
            .filter(|v| **v != T::ZERO)
            .fold(0i32, |acc, v| acc.wrapping_add(v.hash_code()));
        if self.contains_zero {
            hash = hash.wrapping_add(T::ZERO.hash_code());
        }
        hash
    }

    /// Computes a histogram of probe lengths for the current layout.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> ProbeHistogram {
        self.table.probe_histogram()
    }

    /// Returns detailed utilization statistics for debugging.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        self.table.debug_stats()
    }

    #[cfg(test)]
    pub(crate) fn mod_count(&self) -> usize {
        self.table.mod_count()
    }
}

impl<T: Primitive> Default for IntHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Primitive> PartialEq for IntHashSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.table.len() == other.table.len()
            && self.contains_zero == other.contains_zero
            && other
                .table
                .slots()
                .iter()
                .filter(|v| **v != T::ZERO)
                .all(|v| self.table.find(*v).is_some())
    }
}

impl<T: Primitive> Eq for IntHashSet<T> {}

impl<T: Primitive> Hash for IntHashSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_i32(self.hash_code());
    }
}

impl<T: Primitive> Debug for IntHashSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Primitive> Display for IntHashSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}

impl<T: Primitive> FromIterator<T> for IntHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Primitive> Extend<T> for IntHashSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<'a, T: Primitive> Extend<&'a T> for IntHashSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, T: Primitive> IntoIterator for &'a IntHashSet<T> {
    type IntoIter = Iter<'a, T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Primitive> IntoIterator for IntHashSet<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        let remaining = self.len();
        let zero = self.contains_zero;
        let slots = self.table.into_slots();
        IntoIter {
            walk: SlotWalk::new(&slots),
            slots,
            remaining,
            zero,
        }
    }
}

#[inline]
fn next_value<T: Primitive>(
    slots: &[T],
    walk: &mut SlotWalk,
    remaining: &mut usize,
    zero: bool,
) -> Option<T> {
    if *remaining == 0 {
        return None;
    }
    if *remaining == 1 && zero {
        *remaining = 0;
        return Some(T::ZERO);
    }

    let index = walk.next_occupied(slots)?;
    *remaining -= 1;
    Some(slots[index])
}

/// An iterator over the values of an `IntHashSet`.
#[derive(Clone)]
pub struct Iter<'a, T> {
    slots: &'a [T],
    walk: SlotWalk,
    remaining: usize,
    zero: bool,
}

impl<T: Primitive> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        next_value(self.slots, &mut self.walk, &mut self.remaining, self.zero)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Primitive> ExactSizeIterator for Iter<'_, T> {}

impl<T: Primitive> FusedIterator for Iter<'_, T> {}

/// A consuming iterator over the values of an `IntHashSet`.
pub struct IntoIter<T> {
    slots: Box<[T]>,
    walk: SlotWalk,
    remaining: usize,
    zero: bool,
}

impl<T: Primitive> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        next_value(&self.slots, &mut self.walk, &mut self.remaining, self.zero)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Primitive> ExactSizeIterator for IntoIter<T> {}

impl<T: Primitive> FusedIterator for IntoIter<T> {}
