use alloc::boxed::Box;
use alloc::vec;
use core::fmt::Debug;

use crate::error::Error;
use crate::primitive::Primitive;
use crate::probe::next_power_of_two;
use crate::probe::next_probe;
use crate::probe::resize_threshold;
use crate::probe::slot_index;

/// Smallest accepted load factor.
pub const MIN_LOAD_FACTOR: f32 = 0.1;

/// Largest accepted load factor.
pub const MAX_LOAD_FACTOR: f32 = 0.9;

#[inline(always)]
fn home_slot<T: Primitive>(value: T, mask: usize) -> usize {
    slot_index(value.hash_code(), mask)
}

/// Debug statistics for table analysis.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of non-zero values stored in slots
    pub populated: usize,
    /// Total number of slots allocated
    pub capacity: usize,
    /// Population at which the next insert triggers growth
    pub resize_threshold: usize,
    /// Configured load factor
    pub load_factor: f32,
    /// Slot utilization (populated / capacity)
    pub slot_utilization: f64,
    /// Longest distance between a value's home slot and its actual slot
    pub max_probe_length: usize,
    /// Mean distance between a value's home slot and its actual slot
    pub mean_probe_length: f64,
    /// Total bytes held by the slot buffer
    pub total_bytes: usize,
}

#[cfg(any(test, feature = "stats"))]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Probe Table Debug Statistics ===");
        println!(
            "Population: {}/{} slots ({:.2}% utilization, configured load factor {:.2})",
            self.populated,
            self.capacity,
            self.slot_utilization * 100.0,
            self.load_factor
        );
        println!("Resize threshold: {}", self.resize_threshold);
        println!(
            "Probe length: max {}, mean {:.3}",
            self.max_probe_length, self.mean_probe_length
        );
        println!("Total Allocated: {} bytes", self.total_bytes);
    }
}

/// Histogram of probe lengths: `counts()[n]` is the number of values sitting
/// `n` slots past their home slot.
#[cfg(any(test, feature = "stats"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    counts: alloc::vec::Vec<usize>,
}

#[cfg(any(test, feature = "stats"))]
impl ProbeHistogram {
    /// Per-length counts, indexed by probe length.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total number of values counted.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Pretty-prints the histogram horizontally using stdout.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        let max = self.counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            println!("probe histogram: empty");
            return;
        }

        let max_bar = 60usize;
        let total_units = max_bar * 8;
        println!("probe histogram ({} entries):", self.total());

        let make_bar = |count: usize| -> alloc::string::String {
            if count == 0 {
                return alloc::string::String::new();
            }
            let units = ((count as u128 * total_units as u128).div_ceil(max as u128)) as usize;
            let mut bar = "█".repeat(units / 8);
            let partial = match units % 8 {
                1 => Some('▏'),
                2 => Some('▎'),
                3 => Some('▍'),
                4 => Some('▌'),
                5 => Some('▋'),
                6 => Some('▊'),
                7 => Some('▉'),
                _ => None,
            };
            if let Some(ch) = partial {
                bar.push(ch);
            }
            bar
        };

        for (i, &count) in self.counts.iter().enumerate() {
            println!("{:>3} | {} ({})", i, make_bar(count), count);
        }
    }
}

/// Open-addressing storage for the non-zero members of a set.
///
/// `slots` always has a power-of-two length and at least one empty (zero)
/// slot, so every probe sequence terminates. Zero itself is never written to
/// `slots`; the owning set tracks it separately.
#[derive(Clone)]
pub(crate) struct ProbeTable<T> {
    slots: Box<[T]>,
    populated: usize,
    resize_threshold: usize,
    load_factor: f32,
    mod_count: usize,
}

impl<T: Primitive> Debug for ProbeTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProbeTable")
            .field("populated", &self.populated)
            .field("capacity", &self.slots.len())
            .field("resize_threshold", &self.resize_threshold)
            .field("load_factor", &self.load_factor)
            .field("mod_count", &self.mod_count)
            .field("slots", &self.slots)
            .finish()
    }
}

impl<T: Primitive> ProbeTable<T> {
    /// Creates an empty table of `next_power_of_two(capacity)` slots.
    pub(crate) fn with_capacity(capacity: usize, load_factor: f32) -> Result<Self, Error> {
        if load_factor.is_nan() || !(MIN_LOAD_FACTOR..=MAX_LOAD_FACTOR).contains(&load_factor) {
            return Err(Error::InvalidLoadFactor(load_factor));
        }

        let capacity = next_power_of_two(capacity)?;
        Ok(Self {
            slots: vec![T::ZERO; capacity].into_boxed_slice(),
            populated: 0,
            resize_threshold: resize_threshold(capacity, load_factor),
            load_factor,
            mod_count: 0,
        })
    }

    #[inline(always)]
    fn mask(&self) -> usize {
        self.slots.len() - 1
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.populated
    }

    #[inline(always)]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    pub(crate) fn load_factor(&self) -> f32 {
        self.load_factor
    }

    #[inline(always)]
    pub(crate) fn mod_count(&self) -> usize {
        self.mod_count
    }

    #[inline(always)]
    pub(crate) fn slots(&self) -> &[T] {
        &self.slots
    }

    pub(crate) fn into_slots(self) -> Box<[T]> {
        self.slots
    }

    /// Records a structural change that happened outside the slots (zero
    /// membership, clear).
    #[inline(always)]
    pub(crate) fn touch(&mut self) {
        self.mod_count = self.mod_count.wrapping_add(1);
    }

    /// Returns the slot holding `value`, if any. `value` must not be zero.
    pub(crate) fn find(&self, value: T) -> Option<usize> {
        debug_assert!(value != T::ZERO);
        let mask = self.mask();
        let mut index = home_slot(value, mask);
        loop {
            let current = self.slots[index];
            if current == T::ZERO {
                return None;
            }
            if current == value {
                return Some(index);
            }
            index = next_probe(index, mask);
        }
    }

    /// Inserts a non-zero `value`, growing the table once the population
    /// exceeds the resize threshold. Returns `false` if already present.
    pub(crate) fn insert(&mut self, value: T) -> bool {
        debug_assert!(value != T::ZERO);
        let mask = self.mask();
        let mut index = home_slot(value, mask);
        loop {
            let current = self.slots[index];
            if current == T::ZERO {
                break;
            }
            if current == value {
                return false;
            }
            index = next_probe(index, mask);
        }

        self.touch();
        self.slots[index] = value;
        self.populated += 1;
        if self.populated > self.resize_threshold {
            self.grow();
        }

        true
    }

    /// Removes a non-zero `value`. Returns `false` if it was absent.
    pub(crate) fn remove(&mut self, value: T) -> bool {
        match self.find(value) {
            Some(index) => {
                self.remove_at(index);
                true
            }
            None => false,
        }
    }

    /// Clears the occupied slot at `index` and repairs the probe chain that
    /// ran through it.
    pub(crate) fn remove_at(&mut self, index: usize) {
        debug_assert!(self.slots[index] != T::ZERO);
        self.touch();
        self.slots[index] = T::ZERO;
        self.populated -= 1;
        self.compact_chain(index);
    }

    /// Backward-shift repair after a deletion at `gap`.
    ///
    /// Walks forward until the first empty slot. A value may move into the gap
    /// iff the gap lies cyclically within `[home, index)`; moving it any
    /// further back would put it before its own home slot.
    fn compact_chain(&mut self, mut gap: usize) {
        let mask = self.mask();
        let mut index = gap;
        loop {
            index = next_probe(index, mask);
            let value = self.slots[index];
            if value == T::ZERO {
                return;
            }

            let home = home_slot(value, mask);
            let movable = if home <= index {
                home <= gap && gap < index
            } else {
                gap >= home || gap < index
            };

            if movable {
                self.slots[gap] = value;
                self.slots[index] = T::ZERO;
                gap = index;
            }
        }
    }

    #[cold]
    fn grow(&mut self) {
        let mut capacity = self.slots.len();
        loop {
            capacity = capacity.checked_mul(2).expect("capacity overflow");
            if resize_threshold(capacity, self.load_factor) >= self.populated {
                break;
            }
        }
        log::trace!(
            "growing probe table from {} to {} slots ({} values)",
            self.slots.len(),
            capacity,
            self.populated
        );
        self.rehash(capacity);
    }

    /// Reinserts every value into a fresh buffer of `capacity` slots.
    ///
    /// `capacity` must be a power of two whose threshold admits the current
    /// population.
    pub(crate) fn rehash(&mut self, capacity: usize) {
        debug_assert!(capacity.is_power_of_two());
        debug_assert!(resize_threshold(capacity, self.load_factor) >= self.populated);
        debug_assert!(capacity > self.populated);

        self.touch();
        let mask = capacity - 1;
        let mut slots = vec![T::ZERO; capacity].into_boxed_slice();
        for &value in self.slots.iter().filter(|v| **v != T::ZERO) {
            let mut index = home_slot(value, mask);
            while slots[index] != T::ZERO {
                index = next_probe(index, mask);
            }
            slots[index] = value;
        }

        self.slots = slots;
        self.resize_threshold = resize_threshold(capacity, self.load_factor);
    }

    /// Validates a caller-supplied rehash target.
    pub(crate) fn check_rehash_capacity(&self, capacity: usize) -> Result<(), Error> {
        if !capacity.is_power_of_two()
            || capacity <= self.populated
            || resize_threshold(capacity, self.load_factor) < self.populated
        {
            return Err(Error::InvalidCapacity(capacity));
        }
        Ok(())
    }

    /// Smallest power-of-two capacity whose threshold admits `count` values.
    pub(crate) fn compact_capacity(&self, count: usize) -> Result<usize, Error> {
        let mut capacity = next_power_of_two(count)?;
        while resize_threshold(capacity, self.load_factor) < count || capacity <= count {
            capacity = capacity
                .checked_mul(2)
                .ok_or(Error::InvalidCapacity(capacity))?;
        }
        Ok(capacity)
    }

    /// Empties every slot. The caller records the structural change.
    pub(crate) fn clear(&mut self) {
        self.slots.fill(T::ZERO);
        self.populated = 0;
    }

    #[cfg(any(test, feature = "stats"))]
    fn probe_length(&self, index: usize) -> usize {
        let mask = self.mask();
        index.wrapping_sub(home_slot(self.slots[index], mask)) & mask
    }

    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn probe_histogram(&self) -> ProbeHistogram {
        let mut counts = alloc::vec::Vec::new();
        for index in 0..self.slots.len() {
            if self.slots[index] == T::ZERO {
                continue;
            }
            let length = self.probe_length(index);
            if counts.len() <= length {
                counts.resize(length + 1, 0);
            }
            counts[length] += 1;
        }
        ProbeHistogram { counts }
    }

    #[cfg(any(test, feature = "stats"))]
    pub(crate) fn debug_stats(&self) -> DebugStats {
        let histogram = self.probe_histogram();
        let counts = histogram.counts();
        let total_length: usize = counts.iter().enumerate().map(|(len, n)| len * n).sum();
        DebugStats {
            populated: self.populated,
            capacity: self.slots.len(),
            resize_threshold: self.resize_threshold,
            load_factor: self.load_factor,
            slot_utilization: self.populated as f64 / self.slots.len() as f64,
            max_probe_length: counts.len().saturating_sub(1),
            mean_probe_length: if self.populated == 0 {
                0.0
            } else {
                total_length as f64 / self.populated as f64
            },
            total_bytes: core::mem::size_of_val(&*self.slots),
        }
    }
}

/// Position of a backward walk over the occupied slots of a table.
///
/// The walk starts just below an empty slot (or the end of the table when the
/// last slot is empty) and visits every slot exactly once, descending and
/// wrapping. Deletion compaction only moves values backward from slots above
/// the one just removed, and those have already been visited, so removing the
/// current value never causes a value to be skipped or revisited.
#[derive(Debug, Clone)]
pub(crate) struct SlotWalk {
    position: usize,
    stop: usize,
}

impl SlotWalk {
    pub(crate) fn new<T: Primitive>(slots: &[T]) -> Self {
        let len = slots.len();
        let start = if slots[len - 1] == T::ZERO {
            len
        } else {
            slots.iter().position(|v| *v == T::ZERO).unwrap_or(len)
        };
        Self {
            position: start + len,
            stop: start,
        }
    }

    /// Advances to the next occupied slot and returns its index.
    pub(crate) fn next_occupied<T: Primitive>(&mut self, slots: &[T]) -> Option<usize> {
        let mask = slots.len() - 1;
        while self.position > self.stop {
            self.position -= 1;
            let index = self.position & mask;
            if slots[index] != T::ZERO {
                return Some(index);
            }
        }
        None
    }
}
