use std::mem;

use crate::{
    bucket::{Bucket, allocate_buckets},
    error::{HashMapError, check_bounds},
    hash::bucket_index,
};

/// Load factor used when none is given
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;
/// Bucket count used when none is given
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// A string-keyed hash table using separate chaining.
///
/// Every bucket holds an ordered chain of entries whose keys hash to its index.
/// When a new key would push `len / capacity` above the load factor threshold,
/// the bucket count doubles and every entry is placed again under the new
/// capacity. Capacity never shrinks except through [`StringHashMap::clear`],
/// which restores the initial bucket count.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct StringHashMap<V> {
    /// The chains, one per bucket index
    buckets: Vec<Bucket<V>>,
    /// Current number of entries across all buckets
    size: usize,
    /// Threshold for `size / capacity`; crossing it on insertion doubles the capacity
    load_factor: f64,
    /// Bucket count restored by `clear`
    initial_capacity: usize,
}

impl<V> Default for StringHashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Extend<(K, V)> for StringHashMap<V>
where
    K: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for StringHashMap<V>
where
    K: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V> StringHashMap<V> {
    /// Creates an empty map with a load factor of 0.75 and 16 buckets
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_LOAD_FACTOR, DEFAULT_INITIAL_CAPACITY)
    }

    /// Creates an empty map with the default load factor and `capacity` buckets
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(DEFAULT_LOAD_FACTOR, capacity)
    }

    /// Creates an empty map with the given load factor threshold and bucket count.
    ///
    /// Any finite, positive load factor is kept as given; thresholds above 1.0 let
    /// chains grow longer before the table doubles. Zero, negative and non-finite
    /// values fall back to the default. The capacity is raised to at least one bucket.
    #[must_use]
    pub fn with_config(load_factor: f64, initial_capacity: usize) -> Self {
        let load_factor = if load_factor.is_finite() && load_factor > 0.0 {
            load_factor
        } else {
            DEFAULT_LOAD_FACTOR
        };
        let initial_capacity = initial_capacity.max(1);

        Self {
            buckets: allocate_buckets(initial_capacity),
            size: 0,
            load_factor,
            initial_capacity,
        }
    }

    /// Resolves the bucket index for `key` under the current capacity, checking it
    /// against the bucket array.
    ///
    /// # Errors
    ///
    /// Returns [`HashMapError::IndexOutOfBounds`] if the computed index does not
    /// address a bucket. This only happens if the hash function is broken.
    pub fn try_bucket_index(&self, key: &str) -> Result<usize, HashMapError> {
        let capacity = self.capacity();
        check_bounds(bucket_index(key, capacity), capacity)
    }

    /// Bucket index for `key`, treating an out-of-range index as fatal.
    ///
    /// # Panics
    ///
    /// Panics if the hash function produced an index outside the bucket array.
    #[allow(clippy::panic)]
    fn index_of(&self, key: &str) -> usize {
        match self.try_bucket_index(key) {
            Ok(index) => index,
            Err(err) => panic!("{err}"),
        }
    }

    /// The bucket `key` belongs to
    fn bucket_for(&self, key: &str) -> Option<&Bucket<V>> {
        self.buckets.get(self.index_of(key))
    }

    /// The bucket `key` belongs to, mutably
    fn bucket_for_mut(&mut self, key: &str) -> Option<&mut Bucket<V>> {
        let index = self.index_of(key);
        self.buckets.get_mut(index)
    }

    /// Inserts a key-value pair.
    ///
    /// If the key is already present its value is overwritten in place and the old
    /// value returned; the size does not change and no resize happens. Otherwise, if
    /// the new entry would push the load factor above the threshold, the table
    /// doubles until it fits, then the entry is appended to its chain.
    ///
    /// # Panics
    ///
    /// Panics if the hash function produced an index outside the bucket array.
    pub fn set(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        let value = match self.bucket_for_mut(&key) {
            Some(bucket) => match bucket.replace(&key, value) {
                Ok(previous) => return Some(previous),
                Err(value) => value,
            },
            None => value,
        };

        while self.exceeds_load_factor(self.size.saturating_add(1)) {
            self.resize();
        }

        let index = self.index_of(&key);
        if let Some(bucket) = self.buckets.get_mut(index) {
            log::trace!("inserting {key:?} into bucket {index}");
            bucket.push(key, value);
            self.size = self.size.saturating_add(1);
        }
        None
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.bucket_for(key)?.get(key)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.bucket_for_mut(key)?.get_mut(key)
    }

    /// Returns true if the map holds `key`
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, returning whether it was present.
    ///
    /// Later entries in the same chain keep their relative order. Removal never
    /// shrinks the table.
    pub fn remove(&mut self, key: &str) -> bool {
        self.take(key).is_some()
    }

    /// Removes `key` and returns its value
    pub fn take(&mut self, key: &str) -> Option<V> {
        let value = self.bucket_for_mut(key)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(value)
    }

    /// Returns the number of entries in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Drops every entry and restores the initial bucket count.
    ///
    /// The load factor threshold and initial capacity are kept.
    pub fn clear(&mut self) {
        log::debug!(
            "clearing {} entries, capacity {} -> {}",
            self.size,
            self.capacity(),
            self.initial_capacity
        );
        self.buckets = allocate_buckets(self.initial_capacity);
        self.size = 0;
    }

    /// Returns the number of buckets in the map
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the bucket count the map was created with
    #[must_use]
    pub fn initial_capacity(&self) -> usize {
        self.initial_capacity
    }

    /// Returns the load factor threshold that triggers growth
    #[must_use]
    pub fn load_factor_threshold(&self) -> f64 {
        self.load_factor
    }

    /// Returns the current load factor of the hash map
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Whether holding `len` entries would put the map over its load factor threshold
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn exceeds_load_factor(&self, len: usize) -> bool {
        len as f64 / self.capacity() as f64 > self.load_factor
    }

    /// Doubles the bucket count and places every entry again.
    ///
    /// Entries go back in through [`StringHashMap::set`], so each one is hashed
    /// against the new capacity and the size is rebuilt one insertion at a time.
    fn resize(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity.saturating_mul(2);
        log::debug!(
            "resizing from {old_capacity} to {new_capacity} buckets ({} entries)",
            self.size
        );

        let old_buckets = mem::replace(&mut self.buckets, allocate_buckets(new_capacity));
        self.size = 0;

        for entry in old_buckets.into_iter().flat_map(Bucket::into_entries) {
            self.set(entry.key, entry.value);
        }

        log::debug!("resized to {} buckets holding {} entries", self.capacity(), self.size);
    }

    /// Length of every chain, in bucket index order
    #[must_use]
    pub fn chain_lengths(&self) -> Vec<usize> {
        self.buckets.iter().map(Bucket::len).collect()
    }

    /// Contents of the bucket at `index` in chain order, or `None` past the last bucket
    #[must_use]
    pub fn bucket(&self, index: usize) -> Option<Vec<(&str, &V)>> {
        let bucket = self.buckets.get(index)?;
        Some(bucket.iter().map(|entry| (entry.key.as_str(), &entry.value)).collect())
    }

    /// Returns an iterator over the key-value pairs.
    ///
    /// Pairs come in bucket index order, and in chain order within a bucket. The
    /// order is not insertion order and changes when the table resizes.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: &self.buckets, bucket: 0, position: 0 }
    }

    /// Snapshot of every key, in iteration order
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(k, _)| k.to_owned()).collect()
    }
}

impl<V: Clone> StringHashMap<V> {
    /// Snapshot of every value, in iteration order
    #[must_use]
    pub fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Snapshot of every key-value pair, in iteration order
    #[must_use]
    pub fn entries(&self) -> Vec<(String, V)> {
        self.iter().map(|(k, v)| (k.to_owned(), v.clone())).collect()
    }
}

/// Iterator over the key-value pairs of the hash table
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The map's buckets
    buckets: &'a [Bucket<V>],
    /// Bucket currently being walked
    bucket: usize,
    /// Next position within that bucket's chain
    position: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(bucket) = self.buckets.get(self.bucket) {
            if let Some(entry) = bucket.entry(self.position) {
                self.position = self.position.saturating_add(1);
                return Some((entry.key.as_str(), &entry.value));
            }
            self.bucket = self.bucket.saturating_add(1);
            self.position = 0;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRUITS: [(&str, &str); 12] = [
        ("apple", "red"),
        ("banana", "yellow"),
        ("carrot", "orange"),
        ("dog", "brown"),
        ("elephant", "gray"),
        ("frog", "green"),
        ("grape", "purple"),
        ("hat", "black"),
        ("ice cream", "white"),
        ("jacket", "blue"),
        ("kite", "pink"),
        ("lion", "golden"),
    ];

    fn populated() -> StringHashMap<&'static str> {
        FRUITS.iter().copied().collect()
    }

    /// Every entry sits in the bucket its key hashes to under the current capacity
    fn assert_placement(map: &StringHashMap<&'static str>) {
        for index in 0..map.capacity() {
            for (key, _) in map.bucket(index).unwrap_or_default() {
                assert_eq!(bucket_index(key, map.capacity()), index, "{key} misplaced");
            }
        }
    }

    #[test]
    fn test_defaults() {
        let map: StringHashMap<i32> = StringHashMap::new();
        assert_eq!(map.capacity(), 16);
        assert_eq!(map.initial_capacity(), 16);
        assert!((map.load_factor_threshold() - 0.75).abs() < f64::EPSILON);
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let map: StringHashMap<i32> = StringHashMap::with_config(0.75, 0);
        assert_eq!(map.capacity(), 1);

        for load_factor in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let map: StringHashMap<i32> = StringHashMap::with_config(load_factor, 8);
            assert!((map.load_factor_threshold() - DEFAULT_LOAD_FACTOR).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_high_load_factor_is_kept() {
        let mut map = StringHashMap::with_config(2.0, 4);
        assert!((map.load_factor_threshold() - 2.0).abs() < f64::EPSILON);

        for i in 0..8 {
            map.set(i.to_string(), i);
        }
        // 8 / 4 sits exactly on the threshold
        assert_eq!(map.capacity(), 4);
        assert_eq!(map.len(), 8);

        map.set("8", 8);
        assert_eq!(map.capacity(), 8);
        for i in 0..9 {
            assert_eq!(map.get(&i.to_string()), Some(&i));
        }
    }

    #[test]
    fn test_low_load_factor_is_kept() {
        let mut map = StringHashMap::with_config(0.05, 4);
        assert!((map.load_factor_threshold() - 0.05).abs() < f64::EPSILON);

        map.set("a", 1);
        // 1 / 16 > 0.05, 1 / 32 <= 0.05
        assert_eq!(map.capacity(), 32);
        assert!(map.load_factor() <= map.load_factor_threshold());
    }

    #[test]
    fn test_set_and_get() {
        let mut map = StringHashMap::new();
        assert_eq!(map.set("key1", 1), None);
        assert_eq!(map.set("key2", 2), None);
        assert_eq!(map.set("key3", 3), None);

        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.get("key3"), Some(&3));
        assert_eq!(map.get("key4"), None);
    }

    #[test]
    fn test_update_keeps_size() {
        let mut map = StringHashMap::new();
        assert_eq!(map.set("key1", 1), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.set("key1", 10), Some(1));
        assert_eq!(map.get("key1"), Some(&10));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_has() {
        let mut map = StringHashMap::new();
        map.set("banana", "yellow");

        assert!(map.has("banana"));
        assert!(!map.has("missing"));
    }

    #[test]
    fn test_empty_key() {
        let mut map = StringHashMap::new();
        map.set("", 7);

        assert_eq!(map.try_bucket_index(""), Ok(0));
        assert_eq!(map.bucket(0), Some(vec![("", &7)]));
        assert_eq!(map.get(""), Some(&7));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut map = StringHashMap::new();
        map.set("key1", 1);
        map.set("key2", 2);

        assert!(map.remove("key1"));
        assert_eq!(map.len(), 1);
        assert!(!map.remove("key1"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key1"), None);
        assert_eq!(map.get("key2"), Some(&2));
    }

    #[test]
    fn test_take_returns_value() {
        let mut map = StringHashMap::new();
        map.set("key1", 1);

        assert_eq!(map.take("key1"), Some(1));
        assert_eq!(map.take("key1"), None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_remove_never_shrinks() {
        let mut map = StringHashMap::with_capacity(4);
        for i in 0..10 {
            map.set(i.to_string(), i);
        }
        let grown = map.capacity();
        for i in 0..10 {
            map.remove(&i.to_string());
        }

        assert!(map.is_empty());
        assert_eq!(map.capacity(), grown);
    }

    #[test]
    fn test_collisions_share_a_chain() {
        // With a single bucket every key collides.
        let mut map = StringHashMap::with_config(1.0, 1);
        map.set("a", 1);
        assert_eq!(map.capacity(), 1);
        map.set("b", 2);
        assert_eq!(map.capacity(), 2);

        let mut map = StringHashMap::with_config(1.0, 4);
        // "a" = 97 and "e" = 101 both land in bucket 1 of 4; "i" = 105 too.
        map.set("a", 1);
        map.set("e", 2);
        map.set("i", 3);
        assert_eq!(map.bucket(1), Some(vec![("a", &1), ("e", &2), ("i", &3)]));

        assert!(map.remove("e"));
        assert_eq!(map.bucket(1), Some(vec![("a", &1), ("i", &3)]));
        assert_eq!(map.get("i"), Some(&3));
    }

    #[test]
    fn test_resize_at_threshold() {
        let mut map = StringHashMap::with_config(0.5, 4);

        map.set("key1", 1);
        map.set("key2", 2);
        // 2 / 4 is exactly the threshold, so no growth yet
        assert_eq!(map.capacity(), 4);
        // 3 / 4 would exceed it
        map.set("key3", 3);
        assert_eq!(map.capacity(), 8);

        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.get("key3"), Some(&3));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_low_load_factor_grows_until_it_fits() {
        let mut map = StringHashMap::with_config(0.1, 1);
        map.set("a", 1);
        // 1 / 8 > 0.1, 1 / 16 <= 0.1
        assert_eq!(map.capacity(), 16);
        assert!(map.load_factor() <= map.load_factor_threshold());
    }

    #[test]
    fn test_update_never_resizes() {
        let mut map = StringHashMap::with_config(0.5, 4);
        map.set("key1", 1);
        map.set("key2", 2);
        for i in 0..10 {
            map.set("key2", i);
        }

        assert_eq!(map.capacity(), 4);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_load_factor_stays_under_threshold() {
        let mut map = StringHashMap::new();
        for i in 0..1000 {
            map.set(format!("key-{i}"), i);
            assert!(map.load_factor() <= map.load_factor_threshold());
        }

        assert_eq!(map.len(), 1000);
        assert_eq!(map.capacity(), 2048);
        for i in 0..1000 {
            assert_eq!(map.get(&format!("key-{i}")), Some(&i));
        }
    }

    #[test]
    fn test_entries_are_rehashed_on_resize() {
        let mut map = populated();
        assert_placement(&map);
        map.set("moon", "silver");
        assert_eq!(map.capacity(), 32);
        assert_placement(&map);
    }

    #[test]
    fn test_reference_trace() {
        let mut map = populated();
        assert_eq!(map.len(), 12);
        assert_eq!(map.capacity(), 16);

        assert_eq!(map.set("apple", "green"), Some("red"));
        assert_eq!(map.set("banana", "brown"), Some("yellow"));
        assert_eq!(map.set("lion", "white"), Some("golden"));
        assert_eq!(map.len(), 12);
        assert_eq!(map.capacity(), 16);

        map.set("moon", "silver");
        assert_eq!(map.len(), 13);
        assert_eq!(map.capacity(), 32);
        assert_eq!(map.get("apple"), Some(&"green"));

        map.set("moon", "gold");
        map.set("apple", "crimson");
        map.set("dog", "black");
        assert_eq!(map.len(), 13);
        assert_eq!(map.capacity(), 32);

        assert_eq!(map.get("apple"), Some(&"crimson"));
        assert_eq!(map.get("moon"), Some(&"gold"));
        assert_eq!(map.get("missing"), None);
        assert!(map.has("banana"));
        assert!(!map.has("missing"));

        assert!(map.remove("frog"));
        assert!(!map.remove("frog"));
        assert_eq!(map.len(), 12);

        map.clear();
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), 16);
        assert_eq!(map.chain_lengths().len(), 16);
    }

    #[test]
    fn test_clear_restores_initial_topology() {
        let mut map = StringHashMap::with_config(0.5, 2);
        for i in 0..100 {
            map.set(i.to_string(), i);
        }
        assert!(map.capacity() > 2);

        map.clear();

        assert!(map.is_empty());
        assert_eq!(map.capacity(), 2);
        assert_eq!(map.chain_lengths(), vec![0, 0]);
        assert!((map.load_factor_threshold() - 0.5).abs() < f64::EPSILON);
        assert_eq!(map.get("1"), None);

        map.set("again", 1);
        assert_eq!(map.get("again"), Some(&1));
    }

    #[test]
    fn test_snapshots_follow_bucket_order() {
        let map = populated();
        let mut expected = Vec::new();
        for index in 0..map.capacity() {
            for (key, value) in map.bucket(index).unwrap_or_default() {
                expected.push((key.to_string(), *value));
            }
        }

        assert_eq!(map.entries(), expected);
        assert_eq!(map.keys(), expected.iter().map(|(k, _)| k.clone()).collect::<Vec<_>>());
        assert_eq!(map.values(), expected.iter().map(|(_, v)| *v).collect::<Vec<_>>());
        assert_eq!(map.iter().count(), map.len());
    }

    #[test]
    fn test_snapshots_are_detached() {
        let mut map = populated();
        let keys = map.keys();
        let entries = map.entries();

        map.set("moon", "silver");
        map.remove("apple");

        assert_eq!(keys.len(), 12);
        assert!(keys.iter().any(|k| k == "apple"));
        assert_eq!(entries.len(), 12);
    }

    #[test]
    fn test_chain_lengths_sum_to_len() {
        let map = populated();
        assert_eq!(map.chain_lengths().iter().sum::<usize>(), map.len());
        assert_eq!(map.bucket(map.capacity()), None);
    }

    #[test]
    fn test_get_mut() {
        let mut map = StringHashMap::new();
        map.set("key1", 1);

        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }

        assert_eq!(map.get("key1"), Some(&11));
        assert_eq!(map.get_mut("key2"), None);
    }

    #[test]
    fn test_iter_on_empty_map() {
        let map: StringHashMap<i32> = StringHashMap::new();
        assert_eq!(map.iter().next(), None);
        assert!(map.keys().is_empty());
        assert!(map.entries().is_empty());
    }
}
