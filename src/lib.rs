#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Bulk-operation argument abstraction.
///
/// This module provides the `PrimitiveCollection` trait that lets the bulk
/// operations of `IntHashSet` accept other sets, slices, arrays and standard
/// collections alike.
pub mod collection;

/// Fail-fast cursor with in-place removal.
pub mod cursor;

mod error;

/// The open-addressing integer set.
///
/// This module provides `IntHashSet`, which owns a `ProbeTable` of slots and
/// tracks the zero value out of band.
pub mod hash_set;

mod hash_table;
mod primitive;

pub mod probe;

pub use collection::PrimitiveCollection;
pub use cursor::Cursor;
pub use error::Error;
pub use hash_set::DEFAULT_CAPACITY;
pub use hash_set::DEFAULT_LOAD_FACTOR;
pub use hash_set::IntHashSet;
#[cfg(any(test, feature = "stats"))]
pub use hash_table::DebugStats;
pub use hash_table::MAX_LOAD_FACTOR;
pub use hash_table::MIN_LOAD_FACTOR;
#[cfg(any(test, feature = "stats"))]
pub use hash_table::ProbeHistogram;
pub use primitive::Primitive;
