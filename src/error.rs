use core::fmt;

/// Errors reported by [`IntHashSet`](crate::IntHashSet) and its
/// [`Cursor`](crate::Cursor).
///
/// Every variant describes a violated precondition. The operation that
/// produced it was abandoned before touching the set, so the set itself is
/// always left in a consistent state.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The requested capacity cannot be used: it does not round up to a
    /// representable power of two, or (for an explicit rehash) it is not a
    /// power of two or is too small for the current contents.
    InvalidCapacity(usize),
    /// The load factor is NaN or outside
    /// [`MIN_LOAD_FACTOR`](crate::MIN_LOAD_FACTOR)..=[`MAX_LOAD_FACTOR`](crate::MAX_LOAD_FACTOR).
    InvalidLoadFactor(f32),
    /// [`Cursor::remove`](crate::Cursor::remove) was called before
    /// [`Cursor::next`](crate::Cursor::next), or twice without an intervening
    /// `next`.
    IllegalIteratorState,
    /// [`Cursor::next`](crate::Cursor::next) was called with no values
    /// remaining.
    NoMoreElements,
    /// The set was structurally modified by something other than the cursor
    /// since the cursor last observed it.
    ConcurrentModification,
}

impl Error {
    /// Returns `true` for errors caused by invalid construction arguments.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidCapacity(_) | Error::InvalidLoadFactor(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(capacity) => write!(f, "invalid capacity: {}", capacity),
            Error::InvalidLoadFactor(load_factor) => {
                write!(f, "invalid load factor: {}", load_factor)
            }
            Error::IllegalIteratorState => {
                write!(f, "illegal iterator state: remove requires a preceding next")
            }
            Error::NoMoreElements => write!(f, "no more elements"),
            Error::ConcurrentModification => {
                write!(f, "set was structurally modified outside the cursor")
            }
        }
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(Error::InvalidCapacity(3).to_string(), "invalid capacity: 3");
        assert_eq!(
            Error::InvalidLoadFactor(0.95).to_string(),
            "invalid load factor: 0.95"
        );
        assert_eq!(Error::NoMoreElements.to_string(), "no more elements");
    }

    #[test]
    fn invalid_argument_classification() {
        assert!(Error::InvalidCapacity(0).is_invalid_argument());
        assert!(Error::InvalidLoadFactor(f32::NAN).is_invalid_argument());
        assert!(!Error::IllegalIteratorState.is_invalid_argument());
        assert!(!Error::ConcurrentModification.is_invalid_argument());
    }
}
