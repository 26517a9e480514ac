//! Stateless slot arithmetic shared by the table, its rehash path and the
//! cursors.
//!
//! Every table capacity is a power of two, so `mask = capacity - 1` turns
//! modulo into a single `&`.

use crate::error::Error;

/// Maps a hash code onto a slot of a table with the given `mask`.
///
/// The hash is reinterpreted as unsigned before masking, so negative hash
/// codes land in the same slot they would under two's-complement `&`.
///
/// ```rust
/// use probe_set::probe::slot_index;
///
/// assert_eq!(slot_index(21, 15), 5);
/// assert_eq!(slot_index(-1, 15), 15);
/// ```
#[inline(always)]
pub fn slot_index(hash: i32, mask: usize) -> usize {
    (hash as u32 as usize) & mask
}

/// Returns the slot probed after `index`, wrapping at the end of the table.
#[inline(always)]
pub fn next_probe(index: usize, mask: usize) -> usize {
    (index + 1) & mask
}

/// Returns the smallest power of two that is at least `max(n, 1)`.
///
/// Fails with [`Error::InvalidCapacity`] if that power of two does not fit in
/// a `usize`.
///
/// ```rust
/// use probe_set::probe::next_power_of_two;
///
/// assert_eq!(next_power_of_two(0), Ok(1));
/// assert_eq!(next_power_of_two(16), Ok(16));
/// assert_eq!(next_power_of_two(17), Ok(32));
/// assert!(next_power_of_two(usize::MAX).is_err());
/// ```
pub fn next_power_of_two(n: usize) -> Result<usize, Error> {
    n.max(1)
        .checked_next_power_of_two()
        .ok_or(Error::InvalidCapacity(n))
}

/// Number of non-zero values a table of `capacity` slots may hold before it
/// must grow: `floor(capacity * load_factor)`.
#[inline]
pub fn resize_threshold(capacity: usize, load_factor: f32) -> usize {
    (capacity as f64 * load_factor as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_index_masks() {
        assert_eq!(slot_index(5, 15), 5);
        assert_eq!(slot_index(37, 15), 5);
        assert_eq!(slot_index(i32::MIN, 15), 0);
        assert_eq!(slot_index(-2, 31), 30);
        assert_eq!(slot_index(12345, 0), 0);
    }

    #[test]
    fn next_probe_wraps() {
        assert_eq!(next_probe(0, 15), 1);
        assert_eq!(next_probe(14, 15), 15);
        assert_eq!(next_probe(15, 15), 0);
        assert_eq!(next_probe(0, 0), 0);
    }

    #[test]
    fn powers_of_two() {
        assert_eq!(next_power_of_two(1), Ok(1));
        assert_eq!(next_power_of_two(2), Ok(2));
        assert_eq!(next_power_of_two(3), Ok(4));
        assert_eq!(next_power_of_two(1000), Ok(1024));
        assert_eq!(
            next_power_of_two((usize::MAX >> 1) + 2),
            Err(Error::InvalidCapacity((usize::MAX >> 1) + 2))
        );
    }

    #[test]
    fn thresholds() {
        assert_eq!(resize_threshold(16, 0.55), 8);
        assert_eq!(resize_threshold(32, 0.55), 17);
        assert_eq!(resize_threshold(1, 0.55), 0);
        assert_eq!(resize_threshold(16, 0.9), 14);
        assert_eq!(resize_threshold(16, 0.1), 1);
    }
}
