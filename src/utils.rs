//! Utility functions for inspecting and building `StringHashMap` instances

use crate::StringHashMap;

/// Summary of how entries are spread across a map's chains
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainStats {
    /// Number of buckets
    pub buckets: usize,
    /// Buckets whose chain is empty
    pub empty_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// Mean chain length over the non-empty buckets, 0 when the map is empty
    pub mean_chain_length: f64,
}

impl ChainStats {
    /// Collects chain statistics for `map`
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn of<V>(map: &StringHashMap<V>) -> Self {
        let lengths = map.chain_lengths();
        let empty_buckets = lengths.iter().filter(|&&len| len == 0).count();
        let occupied = lengths.len() - empty_buckets;
        let mean_chain_length =
            if occupied == 0 { 0.0 } else { map.len() as f64 / occupied as f64 };

        Self {
            buckets: lengths.len(),
            empty_buckets,
            longest_chain: lengths.iter().copied().max().unwrap_or(0),
            mean_chain_length,
        }
    }

    /// Counts how many buckets hold a chain of each length.
    ///
    /// Entry `i` of the result is the number of buckets with exactly `i` entries.
    #[must_use]
    pub fn histogram<V>(map: &StringHashMap<V>) -> Vec<usize> {
        let lengths = map.chain_lengths();
        let longest = lengths.iter().copied().max().unwrap_or(0);
        let mut counts = vec![0_usize; longest.saturating_add(1)];
        for len in lengths {
            if let Some(count) = counts.get_mut(len) {
                *count = count.saturating_add(1);
            }
        }
        counts
    }
}

/// Creates a `StringHashMap` with the given load factor and capacity from an
/// iterator of key-value pairs
pub fn from_pairs<K, V, I>(load_factor: f64, initial_capacity: usize, iter: I) -> StringHashMap<V>
where
    K: Into<String>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = StringHashMap::with_config(load_factor, initial_capacity);
    map.extend(iter);
    map
}
