//! Polynomial rolling hash used to place keys into buckets

/// Multiplier applied to the running hash before each character code is added
pub const PRIME_MULTIPLIER: u128 = 31;

/// Maps `key` to a bucket index in `0..capacity`.
///
/// Character codes are the key's UTF-16 code units, folded left to right as
/// `h = (31 * h + code) % capacity` starting from 0. Reducing at every step
/// keeps the running value below `capacity`, so the result is in range by
/// construction. The index depends on `capacity`: every key has to be placed
/// again whenever the bucket count changes.
///
/// An empty key hashes to 0. A zero capacity has no valid slot and yields 0,
/// which the caller's bounds check rejects.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn bucket_index(key: &str, capacity: usize) -> usize {
    if capacity == 0 {
        return 0;
    }
    // `usize` always fits in `u128`, and `31 * h + code` stays far below its limit.
    let modulus = capacity as u128;
    let hash = key
        .encode_utf16()
        .fold(0_u128, |hash, unit| (PRIME_MULTIPLIER * hash + u128::from(unit)) % modulus);

    usize::try_from(hash).unwrap_or(usize::MAX)
}
