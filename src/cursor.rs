//! Fail-fast iteration with in-place removal.
//!
//! A [`Cursor`] holds only a position, not a borrow of the set. Each step
//! takes the set explicitly, so the set can be modified through other paths
//! between steps. The cursor notices such modifications through the set's
//! modification counter and refuses to continue.

use core::marker::PhantomData;

use crate::error::Error;
use crate::hash_set::IntHashSet;
use crate::hash_table::SlotWalk;
use crate::primitive::Primitive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Yielded {
    Slot(usize),
    Zero,
}

/// A detached cursor over the values of an [`IntHashSet`].
///
/// Created by [`IntHashSet::cursor`]. Values are visited in the same order as
/// [`IntHashSet::iter`]. [`remove`](Cursor::remove) deletes the value last
/// returned by [`next`](Cursor::next) and keeps the cursor valid; any other
/// structural change to the set makes every later call fail with
/// [`Error::ConcurrentModification`].
///
/// Passing any set other than the one that created the cursor (a clone
/// included) is reported as [`Error::ConcurrentModification`] as well.
///
/// # Examples
///
/// ```rust
/// use probe_set::Error;
/// use probe_set::IntHashSet;
///
/// let mut set: IntHashSet<i32> = (0..10).collect();
/// let mut cursor = set.cursor();
/// while cursor.has_next() {
///     let value = cursor.next(&set)?;
///     if value % 2 == 0 {
///         cursor.remove(&mut set)?;
///     }
/// }
/// assert_eq!(set.len(), 5);
///
/// let mut cursor = set.cursor();
/// set.add(100);
/// assert_eq!(cursor.next(&set), Err(Error::ConcurrentModification));
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cursor<T> {
    walk: SlotWalk,
    remaining: usize,
    expected_mod_count: usize,
    // Address and length of the slot buffer the cursor was created over.
    origin: (usize, usize),
    last: Option<Yielded>,
    _marker: PhantomData<T>,
}

impl<T: Primitive> Cursor<T> {
    pub(crate) fn new(set: &IntHashSet<T>) -> Self {
        Self {
            walk: SlotWalk::new(set.table.slots()),
            remaining: set.len(),
            expected_mod_count: set.table.mod_count(),
            origin: slots_origin(set),
            last: None,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if [`next`](Cursor::next) has more values to yield.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.remaining > 0
    }

    fn check_for_comodification(&self, set: &IntHashSet<T>) -> Result<(), Error> {
        if set.table.mod_count() != self.expected_mod_count || slots_origin(set) != self.origin {
            return Err(Error::ConcurrentModification);
        }
        Ok(())
    }

    /// Returns the next value.
    ///
    /// # Errors
    ///
    /// [`Error::ConcurrentModification`] if `set` changed structurally since
    /// the cursor last saw it, [`Error::NoMoreElements`] once every value has
    /// been returned.
    pub fn next(&mut self, set: &IntHashSet<T>) -> Result<T, Error> {
        self.check_for_comodification(set)?;
        if self.remaining == 0 {
            self.last = None;
            return Err(Error::NoMoreElements);
        }

        if self.remaining == 1 && set.contains_zero {
            self.remaining = 0;
            self.last = Some(Yielded::Zero);
            return Ok(T::ZERO);
        }

        let slots = set.table.slots();
        match self.walk.next_occupied(slots) {
            Some(index) => {
                self.remaining -= 1;
                self.last = Some(Yielded::Slot(index));
                Ok(slots[index])
            }
            None => {
                self.last = None;
                Err(Error::NoMoreElements)
            }
        }
    }

    /// Removes the value most recently returned by [`next`](Cursor::next).
    ///
    /// The cursor stays valid afterwards: the removal is adopted as the new
    /// expected state of the set.
    ///
    /// # Errors
    ///
    /// [`Error::IllegalIteratorState`] if `next` has not been called since
    /// the cursor was created or since the last `remove`;
    /// [`Error::ConcurrentModification`] as for `next`.
    pub fn remove(&mut self, set: &mut IntHashSet<T>) -> Result<(), Error> {
        let Some(last) = self.last else {
            return Err(Error::IllegalIteratorState);
        };
        self.check_for_comodification(set)?;
        self.last = None;

        match last {
            Yielded::Zero => {
                set.table.touch();
                set.contains_zero = false;
            }
            Yielded::Slot(index) => set.table.remove_at(index),
        }

        self.expected_mod_count = set.table.mod_count();
        Ok(())
    }
}

// Removal never reallocates, so the buffer stays put for the cursor's lifetime
// unless the set is rehashed, which also bumps the modification count.
fn slots_origin<T: Primitive>(set: &IntHashSet<T>) -> (usize, usize) {
    let slots = set.table.slots();
    (slots.as_ptr().addr(), slots.len())
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn drain_cursor<T: Primitive>(set: &IntHashSet<T>) -> Vec<T> {
        let mut cursor = set.cursor();
        let mut out = Vec::new();
        while cursor.has_next() {
            out.push(cursor.next(set).unwrap());
        }
        out
    }

    #[test]
    fn yields_in_iter_order() {
        let mut set = IntHashSet::<i32>::with_capacity_and_load_factor(16, 0.55).unwrap();
        for v in [15, 31, 1, 0] {
            set.add(v);
        }
        assert_eq!(drain_cursor(&set), [1, 31, 15, 0]);
        assert_eq!(drain_cursor(&set), set.to_vec());
    }

    #[test]
    fn empty_set_has_nothing() {
        let set = IntHashSet::<u8>::new();
        let mut cursor = set.cursor();
        assert!(!cursor.has_next());
        assert_eq!(cursor.next(&set), Err(Error::NoMoreElements));
    }

    #[test]
    fn only_zero() {
        let mut set = IntHashSet::<i16>::new();
        set.add(0);
        let mut cursor = set.cursor();
        assert_eq!(cursor.next(&set), Ok(0));
        assert!(!cursor.has_next());
        cursor.remove(&mut set).unwrap();
        assert!(set.is_empty());
        assert_eq!(cursor.next(&set), Err(Error::NoMoreElements));
    }

    #[test]
    fn next_past_end_fails() {
        let set: IntHashSet<i32> = [1, 2].into_iter().collect();
        let mut cursor = set.cursor();
        cursor.next(&set).unwrap();
        cursor.next(&set).unwrap();
        assert_eq!(cursor.next(&set), Err(Error::NoMoreElements));
    }

    #[test]
    fn remove_requires_next() {
        let mut set: IntHashSet<i32> = [1, 2, 3].into_iter().collect();
        let mut cursor = set.cursor();
        assert_eq!(cursor.remove(&mut set), Err(Error::IllegalIteratorState));

        cursor.next(&set).unwrap();
        assert_eq!(cursor.remove(&mut set), Ok(()));
        assert_eq!(cursor.remove(&mut set), Err(Error::IllegalIteratorState));
        assert_eq!(set.len(), 2);

        cursor.next(&set).unwrap();
        assert_eq!(cursor.remove(&mut set), Ok(()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn foreign_add_fails_fast() {
        let mut set: IntHashSet<i32> = [1, 2, 3].into_iter().collect();
        let mut cursor = set.cursor();
        cursor.next(&set).unwrap();

        set.add(4);
        assert_eq!(cursor.next(&set), Err(Error::ConcurrentModification));
        assert_eq!(cursor.remove(&mut set), Err(Error::ConcurrentModification));
    }

    #[test]
    fn foreign_zero_toggle_and_clear_fail_fast() {
        let mut set: IntHashSet<u32> = [1, 2, 3].into_iter().collect();
        let mut cursor = set.cursor();
        set.add(0);
        assert_eq!(cursor.next(&set), Err(Error::ConcurrentModification));

        let mut cursor = set.cursor();
        set.clear();
        assert_eq!(cursor.next(&set), Err(Error::ConcurrentModification));
    }

    #[test]
    fn cursor_rejects_other_sets() {
        let mut mine: IntHashSet<i32> = [1, 2].into_iter().collect();
        let mut other: IntHashSet<i32> = [3, 4].into_iter().collect();
        assert_eq!(mine.mod_count(), other.mod_count());

        let mut cursor = mine.cursor();
        assert_eq!(cursor.next(&other), Err(Error::ConcurrentModification));
        assert_eq!(cursor.remove(&mut other), Err(Error::IllegalIteratorState));

        cursor.next(&mine).unwrap();
        assert_eq!(cursor.remove(&mut other), Err(Error::ConcurrentModification));
        assert_eq!(other.len(), 2);
        assert!(other.contains(3) && other.contains(4));

        let copy = mine.clone();
        assert_eq!(cursor.next(&copy), Err(Error::ConcurrentModification));

        cursor.remove(&mut mine).unwrap();
        assert_eq!(mine.len(), 1);
        assert!(cursor.next(&mine).is_ok());
        assert!(!cursor.has_next());
    }

    #[test]
    fn non_structural_calls_keep_cursor_valid() {
        let mut set: IntHashSet<i64> = [5, 6, 7].into_iter().collect();
        let mut cursor = set.cursor();
        assert!(!set.add(5));
        assert!(!set.remove(99));
        assert!(set.contains(6));
        assert_eq!(set.iter().count(), 3);
        assert!(cursor.next(&set).is_ok());
    }

    #[test]
    fn own_removals_visit_everything_once() {
        let mut set = IntHashSet::<i32>::with_capacity_and_load_factor(64, 0.9).unwrap();
        // Long collision chains, one of them wrapping around the end.
        let values: Vec<i32> = (0..20)
            .map(|i| 7 + i * 64)
            .chain((0..10).map(|i| 62 + i * 64))
            .chain([0])
            .collect();
        for &v in &values {
            set.add(v);
        }
        let capacity = set.capacity();

        let mut seen = Vec::new();
        let mut cursor = set.cursor();
        while cursor.has_next() {
            let value = cursor.next(&set).unwrap();
            seen.push(value);
            if value % 3 != 0 {
                cursor.remove(&mut set).unwrap();
            }
        }
        assert_eq!(set.capacity(), capacity);

        let mut expected = values.clone();
        expected.sort_unstable();
        seen.sort_unstable();
        assert_eq!(seen, expected);

        for &v in &values {
            assert_eq!(set.contains(v), v % 3 == 0, "value {}", v);
        }
        assert_eq!(set.len(), values.iter().filter(|v| **v % 3 == 0).count());
    }

    #[test]
    fn remove_every_value() {
        let mut set: IntHashSet<u8> = (0..=255).collect();
        let mut cursor = set.cursor();
        let mut count = 0;
        while cursor.has_next() {
            cursor.next(&set).unwrap();
            cursor.remove(&mut set).unwrap();
            count += 1;
        }
        assert_eq!(count, 256);
        assert!(set.is_empty());
    }
}
