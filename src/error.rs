//! Error type for `StringHashMap` internals

use thiserror::Error;

/// Errors raised by the hash map's internal consistency checks.
///
/// Lookups that find nothing are not errors: they surface as `None` or `false`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashMapError {
    /// A computed bucket index fell outside the bucket array
    #[error("Trying to access index out of bounds: index {index}, capacity {capacity}")]
    IndexOutOfBounds {
        /// The offending index
        index: usize,
        /// The bucket count it was checked against
        capacity: usize,
    },
}

/// Checks that `index` addresses one of `capacity` buckets.
pub(crate) fn check_bounds(index: usize, capacity: usize) -> Result<usize, HashMapError> {
    if index < capacity {
        Ok(index)
    } else {
        Err(HashMapError::IndexOutOfBounds { index, capacity })
    }
}
